//! Macro generating the error enums returned by driven ports.
//!
//! Every variant carries at most one `String` field. Each variant gets a
//! snake-case constructor accepting `impl Into<String>`, so adapters can
//! write `RepositoryError::query("...")` without allocating by hand.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[must_use]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident $field:ident) => {
        ::paste::paste! {
            #[must_use]
            pub fn [<$variant:snake>]($field: impl Into<String>) -> Self {
                Self::$variant { $field: $field.into() }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $field:ident } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $field: String } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( $field )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Unreachable { host } => "cannot reach {host}",
            Closed => "port closed",
        }
    }

    #[test]
    fn field_constructor_accepts_str() {
        let err = SamplePortError::unreachable("db.internal");
        assert_eq!(err.to_string(), "cannot reach db.internal");
        assert_eq!(
            err,
            SamplePortError::Unreachable {
                host: "db.internal".to_owned()
            }
        );
    }

    #[test]
    fn unit_constructor_builds_the_variant() {
        assert_eq!(SamplePortError::closed(), SamplePortError::Closed);
        assert_eq!(SamplePortError::closed().to_string(), "port closed");
    }
}
