//! Macros for defining numeric identifiers.

/// Macro for defining a numeric identifier backed by an [`i64`].
///
/// Generated type is parseable from a string, convertible from and into an
/// [`i64`], and is bound to SQL as `INT8` when the `postgres` feature of the
/// calling crate is enabled.
///
/// # Example
///
/// ```rust
/// # use common::define_id;
///
/// define_id! {
///     #[doc = "ID of a shape."]
///     struct Id;
/// }
///
/// let id: Id = "42".parse().unwrap();
/// assert_eq!(i64::from(id), 42);
/// ```
#[macro_export]
macro_rules! define_id {
    (
        #[doc = $doc:literal]
        struct $name:ident;
    ) => {
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[doc = $doc]
        pub struct $name(i64);

        impl ::core::fmt::Display for $name {
            fn fmt(
                &self,
                f: &mut ::core::fmt::Formatter<'_>,
            ) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::core::convert::From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl ::core::convert::From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }

        #[cfg(feature = "postgres")]
        impl $crate::private::postgres_types::ToSql for $name {
            $crate::private::postgres_types::accepts!(INT8);
            $crate::private::postgres_types::to_sql_checked!();

            fn to_sql(
                &self,
                ty: &$crate::private::postgres_types::Type,
                w: &mut $crate::private::postgres_types::private::BytesMut,
            ) -> ::core::result::Result<
                $crate::private::postgres_types::IsNull,
                ::std::boxed::Box<
                    dyn ::std::error::Error
                        + ::core::marker::Sync
                        + ::core::marker::Send
                >,
            > {
                $crate::private::postgres_types::ToSql::to_sql(&self.0, ty, w)
            }
        }
    };
}
