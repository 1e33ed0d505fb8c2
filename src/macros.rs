// src/macros.rs
//! `s!` / `join!`: owned-string shorthands used by the decoders and URL builders.

#[macro_export]
macro_rules! s {
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// `join!(base, "/search?categories=", slug)`; every piece after the first is a `&str`.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut out = ::std::string::String::from($first);
        $( out.push_str($rest); )+
        out
    }};
}
