use sporthlm::clean_uri;
use sporthlm::sanitize::is_clean;

const LABELS: [&str; 10] = [
    "Île-de-France",
    "Auvergne-Rhône-Alpes",
    "Provence-Alpes-Côte d'Azur",
    "2A - Corse-du-Sud",
    "Fédération française de la montagne et de l'escalade",
    "Réunion (974)",
    "Saint-Barthélemy",
    "ÆØÅ æøå",
    "  padded  ",
    "",
];

#[test]
fn ile_de_france() {
    assert_eq!(clean_uri("Île-de-France"), "IledeFrance");
}

#[test]
fn integers_use_their_decimal_form() {
    assert_eq!(clean_uri(42), "42");
    assert_eq!(clean_uri(17i64), "17");
    assert_eq!(clean_uri(0u32), "0");
}

#[test]
fn empty_label_gives_empty_fragment() {
    assert_eq!(clean_uri(""), "");
    assert_eq!(clean_uri(String::new()), "");
}

#[test]
fn output_alphabet_is_restricted() {
    for label in LABELS {
        let fragment = clean_uri(label);
        assert!(is_clean(&fragment), "{label:?} -> {fragment:?}");
        assert!(fragment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }
}

#[test]
fn repeated_sanitizing_is_stable() {
    for label in LABELS {
        let once = clean_uri(label);
        assert_eq!(clean_uri(label), once);
        assert_eq!(clean_uri(&once), once);
    }
}

#[test]
fn case_is_preserved() {
    assert_eq!(clean_uri("Auvergne-Rhône-Alpes"), "AuvergneRhoneAlpes");
    assert_eq!(clean_uri("MiXeD cAsE"), "MiXeD_cAsE");
}

#[test]
fn distinct_labels_may_collide() {
    assert_eq!(clean_uri("Saint-Denis"), clean_uri("SaintDenis"));
}
