#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! re {
    ($pat:literal) => {
        $crate::Pattern::Regex($crate::regex!($pat).clone())
    };
}

#[macro_export]
macro_rules! pred {
    ($p:expr) => {
        $crate::Pattern::Predicate(Box::new($p))
    };
}

#[macro_export]
macro_rules! suffix {
    ($inflected:expr, $deinflected:expr, [ $($cin:expr),* $(,)? ], [ $($cout:expr),* $(,)? ] $(,)?) => {
        $crate::Rule::suffix($inflected, $deinflected, &[ $($cin),* ], &[ $($cout),* ])
    };
}

#[macro_export]
macro_rules! prefix {
    ($inflected:expr, $deinflected:expr, [ $($cin:expr),* $(,)? ], [ $($cout:expr),* $(,)? ] $(,)?) => {
        $crate::Rule::prefix($inflected, $deinflected, &[ $($cin),* ], &[ $($cout),* ])
    };
}

#[macro_export]
macro_rules! whole_word {
    ($inflected:expr, $deinflected:expr, [ $($cin:expr),* $(,)? ], [ $($cout:expr),* $(,)? ] $(,)?) => {
        $crate::Rule::whole_word($inflected, $deinflected, &[ $($cin),* ], &[ $($cout),* ])
    };
}

#[macro_export]
macro_rules! condition {
    (
        id: $id:expr,
        name: $name:expr,
        dictionary_form: $dict:expr
        $(, sub: [ $($sub:expr),* $(,)? ])?
        $(,)?
    ) => {
        $crate::Condition {
            id: $id,
            display_name: $name,
            is_dictionary_form: $dict,
            sub_conditions: &[ $($($sub),*)? ],
        }
    };
}

/// Build a `Transform`. `display_name` defaults to `name`; `rules` takes
/// single rules and `extend` takes generated rule vectors.
#[macro_export]
macro_rules! transform {
    (
        name: $name:expr
        $(, display_name: $display:expr)?
        $(, description: $desc:expr)?
        , rules: [ $($rule:expr),* $(,)? ]
        $(, extend: [ $($extra:expr),* $(,)? ])?
        $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut rules: Vec<$crate::Rule> = vec![ $($rule),* ];
        $($(rules.extend($extra);)*)?
        $crate::Transform {
            name: $name,
            display_name: { let _d = $name; $(let _d = $display;)? _d },
            description: { let _d: Option<&'static str> = None; $(let _d = Some($desc);)? _d },
            rules,
        }
    }};
}
