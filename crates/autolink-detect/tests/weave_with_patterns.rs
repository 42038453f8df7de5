//! Weave passes driven by the regex detector.

use autolink_core::DetectorOptions;
use autolink_core::HashtagService;
use autolink_core::LATLNG_MATCHER_ID;
use autolink_core::MatchKind;
use autolink_core::MentionService;
use autolink_core::Segment;
use autolink_core::WeaveOptions;
use autolink_core::Weaver;
use autolink_core::reconstruct;
use autolink_detect::PatternDetector;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn weave(text: &str, options: &WeaveOptions) -> Vec<Segment> {
    let detector = PatternDetector::new();
    Weaver::new(&detector)
        .weave_with_rng(text, options, &mut StdRng::seed_from_u64(99))
        .unwrap()
}

fn kinds(segments: &[Segment]) -> Vec<MatchKind> {
    segments
        .iter()
        .filter_map(Segment::record)
        .map(|r| r.kind())
        .collect()
}

#[test]
fn test_kind_gating_leaves_phone_as_text() {
    let options = WeaveOptions::new(DetectorOptions {
        phone: false,
        email: true,
        ..DetectorOptions::default()
    });
    let segments = weave("call 555-1234 or visit test@x.com", &options);

    assert_eq!(kinds(&segments), vec![MatchKind::Email]);
    assert!(segments
        .iter()
        .any(|s| !s.is_link() && s.display_text().contains("555-1234")));
}

#[test]
fn test_non_ascii_email_is_linked_whole() {
    let segments = weave("écrire à élise@exemple.fr", &WeaveOptions::default());

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].display_text(), "écrire à ");
    let Some(record) = segments[1].record() else {
        panic!("Expected a link segment, got {:?}", segments[1]);
    };
    assert_eq!(record.kind(), MatchKind::Email);
    assert_eq!(record.matched_text(), "élise@exemple.fr");
    assert_eq!(record.offset(), "écrire à ".len());
    assert_eq!(record.anchor_href(), "mailto:élise@exemple.fr");
}

#[test]
fn test_number_pair_stays_text() {
    let segments = weave("range 100 1000 items", &WeaveOptions::default());
    assert!(kinds(&segments).is_empty());
}

#[test]
fn test_latlng_example() {
    let options = WeaveOptions::default().with_custom(LATLNG_MATCHER_ID);
    let segments = weave("meet me at 40.7128, -74.0060 tomorrow", &options);

    let record = segments.iter().find_map(Segment::record).unwrap();
    assert_eq!(record.kind(), MatchKind::LatLng);
    assert_eq!(record.matched_text(), "40.7128, -74.0060");
    assert_eq!(record.anchor_text(), "40.7128, -74.0060");
}

#[test]
fn test_every_kind_in_one_pass() {
    let options = WeaveOptions::new(DetectorOptions {
        hashtag: Some(HashtagService::Instagram),
        mention: Some(MentionService::Twitter),
        ..DetectorOptions::default()
    })
    .with_custom(LATLNG_MATCHER_ID);
    let text = "Ask @ferris about #rustlang at https://www.rust-lang.org/learn, \
                ferris@crab.dev or +1 555 123 4567. Office: 37.7749,-122.4194";

    let segments = weave(text, &options);

    assert_eq!(
        kinds(&segments),
        vec![
            MatchKind::Mention,
            MatchKind::Hashtag,
            MatchKind::Url,
            MatchKind::Email,
            MatchKind::Phone,
            MatchKind::LatLng,
        ]
    );
    assert_eq!(reconstruct(&segments), text);

    let hrefs: Vec<String> = segments
        .iter()
        .filter_map(Segment::record)
        .map(|r| r.anchor_href())
        .collect();
    assert_eq!(
        hrefs,
        vec![
            "https://twitter.com/ferris",
            "https://www.instagram.com/explore/tags/rustlang",
            "https://www.rust-lang.org/learn",
            "mailto:ferris@crab.dev",
            "tel:+15551234567",
            "37.7749,-122.4194",
        ]
    );
}

#[test]
fn test_url_display_text_is_stripped() {
    let segments = weave("docs: https://www.rust-lang.org/", &WeaveOptions::default());
    let link = segments.iter().find(|s| s.is_link()).unwrap();
    assert_eq!(link.display_text(), "rust-lang.org");
    assert_eq!(link.source_text(), "https://www.rust-lang.org/");
}

#[test]
fn test_looks_like_token_literal_stays_text() {
    let text = "literal @__ELEMENT-deadbeef-0__@ next to a@b.io";
    let segments = weave(text, &WeaveOptions::default());
    assert_eq!(kinds(&segments), vec![MatchKind::Email]);
    assert_eq!(reconstruct(&segments), text);
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn weave_never_drops_or_duplicates_text(text in "[a-z0-9@#.,:/ +()-]{0,80}", seed in any::<u64>()) {
            let detector = PatternDetector::new();
            let options = WeaveOptions::new(DetectorOptions {
                hashtag: Some(HashtagService::Twitter),
                mention: Some(MentionService::Soundcloud),
                ..DetectorOptions::default()
            })
            .with_custom(LATLNG_MATCHER_ID);

            let segments = Weaver::new(&detector)
                .weave_with_rng(&text, &options, &mut StdRng::seed_from_u64(seed))
                .unwrap();

            prop_assert_eq!(reconstruct(&segments), text);
        }
    }
}
