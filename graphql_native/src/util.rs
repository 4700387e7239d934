use std::borrow::Cow;

/// Converts an attribute name into its GraphQL wire name: `a_name` becomes
/// `aName`.
///
/// The first `_`-separated part is kept as is, every following part is
/// title-cased (first letter of each alphabetic run upper-cased, the rest
/// lower-cased) and the separators are dropped.
pub fn to_camel_case(s: &str) -> Cow<'_, str> {
    if !s.contains('_') {
        return Cow::Borrowed(s);
    }

    let mut parts = s.split('_');
    let mut dest = String::with_capacity(s.len());
    dest.push_str(parts.next().unwrap_or_default());

    for part in parts {
        let mut in_word = false;
        for c in part.chars() {
            if in_word {
                dest.extend(c.to_lowercase());
            } else {
                dest.extend(c.to_uppercase());
            }
            in_word = c.is_alphabetic();
        }
    }

    Cow::Owned(dest)
}

#[test]
fn test_to_camel_case() {
    assert_eq!(&to_camel_case("test")[..], "test");
    assert_eq!(&to_camel_case("first_second")[..], "firstSecond");
    assert_eq!(&to_camel_case("first_")[..], "first");
    assert_eq!(&to_camel_case("a_b_c")[..], "aBC");
    assert_eq!(&to_camel_case("a_bc")[..], "aBc");
    assert_eq!(&to_camel_case("home_PLANET")[..], "homePlanet");
    assert_eq!(&to_camel_case("_private")[..], "Private");
    assert_eq!(&to_camel_case("page_2nd_item")[..], "page2NdItem");
    assert_eq!(&to_camel_case("a")[..], "a");
    assert_eq!(&to_camel_case("")[..], "");
}
