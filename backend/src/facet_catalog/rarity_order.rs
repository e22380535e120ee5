//! Two-tier rarity ordering: fixed top tier first, the rest by label.

use std::cmp::Ordering;

use common::facet_values::FacetValue;
use common::url_codec::is_encodable_value;

/// Base letter of an accented Latin lowercase letter.
fn base_letter(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => 'i',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

fn lowered(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Primary order ignores case and accents ("Élite" sits with "elite").
/// Ties put unaccented before accented, then lowercase before uppercase,
/// then fall back to raw bytes.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    lowered(a)
        .map(base_letter)
        .cmp(lowered(b).map(base_letter))
        .then_with(|| {
            let accents_a = lowered(a).map(|c| base_letter(c) != c);
            let accents_b = lowered(b).map(|c| base_letter(c) != c);
            accents_a.cmp(accents_b)
        })
        .then_with(|| {
            let case_a = a.chars().map(char::is_uppercase);
            let case_b = b.chars().map(char::is_uppercase);
            case_a.cmp(case_b)
        })
        .then_with(|| a.cmp(b))
}

/// Labels that cannot be selected through the URL list form are left out.
pub fn order_rarities(available: Vec<String>, top_tier: &[&str]) -> Vec<FacetValue> {
    let mut rest = available
        .iter()
        .filter(|r| is_encodable_value(r) && !top_tier.contains(&r.as_str()))
        .map(String::as_str)
        .collect::<Vec<_>>();
    rest.sort_by(|a, b| locale_compare(a, b));
    rest.dedup();

    top_tier
        .iter()
        .copied()
        .filter(|t| available.iter().any(|r| r == t))
        .chain(rest)
        .map(|r| FacetValue::text(r, r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::catalog_const::TOP_TIER_RARITIES;
    use pretty_assertions::assert_eq;

    fn labels(values: &[FacetValue]) -> Vec<&str> {
        values.iter().map(|v| v.label.as_str()).collect()
    }

    #[test]
    fn top_tier_first_then_alphabetical() {
        let available = ["Rare", "Zeta", "Common", "Foo"].map(String::from).to_vec();
        let ordered = order_rarities(available, &["Common", "Rare"]);
        assert_eq!(labels(&ordered), vec!["Common", "Rare", "Foo", "Zeta"]);
    }

    #[test]
    fn top_tier_keeps_its_own_order() {
        let available = ["Promo", "Ultra Rare", "Common", "Holo Rare", "amazing Rare", "Rare"].map(String::from).to_vec();
        let ordered = order_rarities(available, &TOP_TIER_RARITIES);
        assert_eq!(labels(&ordered), vec!["Common", "Rare", "Ultra Rare", "amazing Rare", "Holo Rare", "Promo"]);
        assert!(ordered.iter().all(|v| v.value.to_string() == v.label));
    }

    #[test]
    fn case_only_differences_put_lowercase_first() {
        assert_eq!(locale_compare("promo", "Promo"), Ordering::Less);
        assert_eq!(locale_compare("Promo", "prism"), Ordering::Greater);
        assert_eq!(locale_compare("Rare", "Rare"), Ordering::Equal);
    }

    #[test]
    fn accents_sort_with_their_base_letter() {
        assert_eq!(locale_compare("Élite", "Zeta"), Ordering::Less);
        assert_eq!(locale_compare("Foo", "Élite"), Ordering::Greater);
        assert_eq!(locale_compare("elite", "Élite"), Ordering::Less);
        assert_eq!(locale_compare("Elite", "élite"), Ordering::Less);

        let available = ["Zeta", "Élite", "Foo", "elite", "Ñandú"].map(String::from).to_vec();
        let ordered = order_rarities(available, &[]);
        assert_eq!(labels(&ordered), vec!["elite", "Élite", "Foo", "Ñandú", "Zeta"]);
    }

    #[test]
    fn labels_with_the_list_delimiter_are_left_out() {
        let available = ["Rare, Holo", "Common", "Rare", " Promo", ""].map(String::from).to_vec();
        let ordered = order_rarities(available, &["Common", "Rare"]);
        assert_eq!(labels(&ordered), vec!["Common", "Rare"]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(order_rarities(Vec::new(), &TOP_TIER_RARITIES).is_empty());
    }
}
