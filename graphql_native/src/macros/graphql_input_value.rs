//! [`graphql_input_value!`] macro implementation.
//!
//! [`graphql_input_value!`]: graphql_input_value

/// Constructs [`InputValue`] literals via JSON-like syntax.
///
/// - a bare `ident` is an enum value, surround it with parens to capture an
///   outer variable instead: `(var)`;
/// - `@ident` is a reference to an operation variable;
/// - object keys are attribute names and must implement
///   [`Into`]`<`[`String`]`>`.
///
/// ```rust
/// # use graphql_native::{graphql_input_value, InputValue};
/// #
/// let stars = 4;
/// let review: InputValue = graphql_input_value!({
///     "stars": (stars),
///     "episode": JEDI,
///     "commentary": @commentary,
///     "tags": ["classic", null],
/// });
/// assert_eq!(
///     review.to_string(),
///     "{stars: 4, episode: JEDI, commentary: $commentary, tags: [\"classic\", null]}",
/// );
/// ```
///
/// [`InputValue`]: crate::InputValue
#[macro_export]
macro_rules! graphql_input_value {
    ///////////
    // Array //
    ///////////

    (@@array [$($elems:expr,)*]) => {
        $crate::InputValue::list(vec![
            $( $elems, )*
        ])
    };

    (@@array [$($elems:expr),*]) => {
        $crate::InputValue::list(vec![
            $( $elems, )*
        ])
    };

    (@@array [$($elems:expr,)*] null $($rest:tt)*) => {
        $crate::graphql_input_value!(
            @@array [$($elems,)* $crate::graphql_input_value!(null)] $($rest)*
        )
    };

    (@@array [$($elems:expr,)*] None $($rest:tt)*) => {
        $crate::graphql_input_value!(
            @@array [$($elems,)* $crate::graphql_input_value!(None)] $($rest)*
        )
    };

    (@@array [$($elems:expr,)*] @$var:ident $($rest:tt)*) => {
        $crate::graphql_input_value!(
            @@array [$($elems,)* $crate::graphql_input_value!(@$var)] $($rest)*
        )
    };

    (@@array [$($elems:expr,)*] [$($array:tt)*] $($rest:tt)*) => {
        $crate::graphql_input_value!(
            @@array [$($elems,)* $crate::graphql_input_value!([$($array)*])] $($rest)*
        )
    };

    (@@array [$($elems:expr,)*] {$($map:tt)*} $($rest:tt)*) => {
        $crate::graphql_input_value!(
            @@array [$($elems,)* $crate::graphql_input_value!({$($map)*})] $($rest)*
        )
    };

    // `true`, `false` or an enum value.
    (@@array [$($elems:expr,)*] $ident:ident, $($rest:tt)*) => {
        $crate::graphql_input_value!(
            @@array [$($elems,)* $crate::graphql_input_value!($ident),] $($rest)*
        )
    };

    (@@array [$($elems:expr,)*] $last:ident ) => {
        $crate::graphql_input_value!(
            @@array [$($elems,)* $crate::graphql_input_value!($last)]
        )
    };

    (@@array [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::graphql_input_value!(
            @@array [$($elems,)* $crate::graphql_input_value!($next),] $($rest)*
        )
    };

    (@@array [$($elems:expr,)*] $last:expr) => {
        $crate::graphql_input_value!(
            @@array [$($elems,)* $crate::graphql_input_value!($last)]
        )
    };

    (@@array [$($elems:expr),*] , $($rest:tt)*) => {
        $crate::graphql_input_value!(@@array [$($elems,)*] $($rest)*)
    };

    (@@array [$($elems:expr),*] $unexpected:tt $($rest:tt)*) => {
        $crate::graphql_input_value!(@unexpected $unexpected)
    };

    ////////////
    // Object //
    ////////////

    (@@object $object:ident () () ()) => {};

    (@@object $object:ident [$($key:tt)+] ($value:expr) , $($rest:tt)*) => {
        $object.push((($($key)+).into(), $value));
        $crate::graphql_input_value!(@@object $object () ($($rest)*) ($($rest)*));
    };

    (@@object $object:ident [$($key:tt)+] ($value:expr) $unexpected:tt $($rest:tt)*) => {
        $crate::graphql_input_value!(@unexpected $unexpected);
    };

    (@@object $object:ident [$($key:tt)+] ($value:expr)) => {
        $object.push((($($key)+).into(), $value));
    };

    (@@object $object:ident ($($key:tt)+) (: null $($rest:tt)*) $copy:tt) => {
        $crate::graphql_input_value!(
            @@object $object
            [$($key)+]
            ($crate::graphql_input_value!(null)) $($rest)*
        );
    };

    (@@object $object:ident ($($key:tt)+) (: None $($rest:tt)*) $copy:tt) => {
        $crate::graphql_input_value!(
            @@object $object
            [$($key)+]
            ($crate::graphql_input_value!(None)) $($rest)*
        );
    };

    (@@object $object:ident ($($key:tt)+) (: @$var:ident $($rest:tt)*) $copy:tt) => {
        $crate::graphql_input_value!(
            @@object $object
            [$($key)+]
            ($crate::graphql_input_value!(@$var)) $($rest)*
        );
    };

    (@@object $object:ident ($($key:tt)+) (: [$($array:tt)*] $($rest:tt)*) $copy:tt) => {
        $crate::graphql_input_value!(
            @@object $object
            [$($key)+]
            ($crate::graphql_input_value!([$($array)*])) $($rest)*
        );
    };

    (@@object $object:ident ($($key:tt)+) (: {$($map:tt)*} $($rest:tt)*) $copy:tt) => {
        $crate::graphql_input_value!(
            @@object $object
            [$($key)+]
            ($crate::graphql_input_value!({$($map)*})) $($rest)*
        );
    };

    (@@object $object:ident ($($key:tt)+) (: $ident:ident , $($rest:tt)*) $copy:tt) => {
        $crate::graphql_input_value!(
            @@object $object
            [$($key)+]
            ($crate::graphql_input_value!($ident)) , $($rest)*
        );
    };

    (@@object $object:ident ($($key:tt)+) (: $last:ident ) $copy:tt) => {
        $crate::graphql_input_value!(
            @@object $object
            [$($key)+]
            ($crate::graphql_input_value!($last))
        );
    };

    (@@object $object:ident ($($key:tt)+) (: $value:expr , $($rest:tt)*) $copy:tt) => {
        $crate::graphql_input_value!(
            @@object $object
            [$($key)+]
            ($crate::graphql_input_value!($value)) , $($rest)*
        );
    };

    (@@object $object:ident ($($key:tt)+) (: $value:expr) $copy:tt) => {
        $crate::graphql_input_value!(
            @@object $object
            [$($key)+]
            ($crate::graphql_input_value!($value))
        );
    };

    // Missing value: "unexpected end of macro invocation".
    (@@object $object:ident ($($key:tt)+) (:) $copy:tt) => {
        $crate::graphql_input_value!();
    };

    (@@object $object:ident ($($key:tt)+) () $copy:tt) => {
        $crate::graphql_input_value!();
    };

    (@@object $object:ident () (: $($rest:tt)*) ($colon:tt $($copy:tt)*)) => {
        $crate::graphql_input_value!(@unexpected $colon);
    };

    (@@object $object:ident ($($key:tt)*) (, $($rest:tt)*) ($comma:tt $($copy:tt)*)) => {
        $crate::graphql_input_value!(@unexpected $comma);
    };

    (@@object $object:ident () (($key:expr) : $($rest:tt)*) $copy:tt) => {
        $crate::graphql_input_value!(
            @@object $object
            ($key)
            (: $($rest)*) (: $($rest)*)
        );
    };

    (@@object $object:ident ($($key:tt)*) (: $($unexpected:tt)+) $copy:tt) => {
        $crate::graphql_input_value!(@@unexpected $($unexpected)+);
    };

    // Munch a token into the current key.
    (@@object $object:ident ($($key:tt)*) ($tt:tt $($rest:tt)*) $copy:tt) => {
        $crate::graphql_input_value!(
            @@object $object
            ($($key)* $tt)
            ($($rest)*) ($($rest)*)
        );
    };

    (@@unexpected) => {};

    //////////////
    // Defaults //
    //////////////

    ([ $($arr:tt)* ]$(,)?) => {
        $crate::graphql_input_value!(@@array [] $($arr)*)
    };

    ({}$(,)?) => {
        $crate::InputValue::from_pairs(vec![])
    };

    ({ $($map:tt)+ }$(,)?) => {
        $crate::InputValue::from_pairs({
            let mut object = vec![];
            $crate::graphql_input_value!(@@object object () ($($map)*) ($($map)*));
            object
        })
    };

    (null$(,)?) => ($crate::InputValue::null());

    (None$(,)?) => ($crate::InputValue::null());

    (true$(,)?) => ($crate::InputValue::from(true));

    (false$(,)?) => ($crate::InputValue::from(false));

    (@$var:ident$(,)?) => ($crate::InputValue::variable(stringify!($var)));

    ($enum:ident$(,)?) => ($crate::InputValue::enum_value(stringify!($enum)));

    (($e:expr)$(,)?) => ($crate::InputValue::from($e));

    ($e:expr$(,)?) => ($crate::InputValue::from($e));
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    type V = crate::InputValue;

    #[test]
    fn scalars_and_names() {
        let val = 42;
        assert_eq!(graphql_input_value!(null), V::Null);
        assert_eq!(graphql_input_value!(1), V::scalar(1));
        assert_eq!(graphql_input_value!("val"), V::scalar("val"));
        assert_eq!(graphql_input_value!(1 + 2), V::scalar(3));
        assert_eq!(graphql_input_value!((val)), V::scalar(42));
        assert_eq!(graphql_input_value!(NEWHOPE), V::enum_value("NEWHOPE"));
        assert_eq!(graphql_input_value!(@after), V::variable("after"));
    }

    #[test]
    fn lists() {
        assert_eq!(graphql_input_value!([]), V::list(vec![]));
        assert_eq!(
            graphql_input_value!([1, [EMPIRE], @first, null]),
            V::list(vec![
                V::scalar(1),
                V::list(vec![V::enum_value("EMPIRE")]),
                V::variable("first"),
                V::Null,
            ]),
        );
    }

    #[test]
    fn objects_keep_key_order() {
        assert_eq!(
            graphql_input_value!({}),
            V::object(IndexMap::<String, _>::new()),
        );

        let value = graphql_input_value!({
            "stars": 5,
            "episode": JEDI,
            "nested": {"first": @first},
        });
        let keys = value
            .to_object_value()
            .map(|o| o.keys().copied().collect::<Vec<_>>());
        assert_eq!(keys, Some(vec!["stars", "episode", "nested"]));
        assert_eq!(
            value.to_string(),
            "{stars: 5, episode: JEDI, nested: {first: $first}}",
        );
    }
}
