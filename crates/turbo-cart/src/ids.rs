//! Newtype IDs for type-safe identifiers.
//!
//! Cart lines carry a synthetic id derived from the product id. Call sites
//! hand back either form, so [`CartLineId::parse`] is the single place that
//! tells them apart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix that turns a product id into a synthetic cart line id.
pub const LINE_ID_PREFIX: &str = "memory_";

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Check whether the ID is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);

/// Identifier of a cart line as received from a caller.
///
/// Serializes as the plain string form so cart lines keep the shape of a
/// remote record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum CartLineId {
    /// `"memory_" + product id`, the id cart lines are projected with.
    Synthetic(ProductId),
    /// A bare product id.
    Raw(ProductId),
}

impl CartLineId {
    /// Parse an incoming id. Anything starting with [`LINE_ID_PREFIX`] is
    /// synthetic; everything else is taken as a product id verbatim.
    pub fn parse(id: &str) -> Self {
        match id.strip_prefix(LINE_ID_PREFIX) {
            Some(product_id) => Self::Synthetic(ProductId::new(product_id)),
            None => Self::Raw(ProductId::new(id)),
        }
    }

    /// The synthetic line id for a product.
    pub fn for_product(product_id: &ProductId) -> Self {
        Self::Synthetic(product_id.clone())
    }

    /// The product id this line id resolves to.
    pub fn product_id(&self) -> &ProductId {
        match self {
            Self::Synthetic(id) | Self::Raw(id) => id,
        }
    }

    /// Check whether this id used the synthetic form.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic(_))
    }
}

impl fmt::Display for CartLineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synthetic(id) => write!(f, "{LINE_ID_PREFIX}{id}"),
            Self::Raw(id) => write!(f, "{id}"),
        }
    }
}

impl From<CartLineId> for String {
    fn from(id: CartLineId) -> Self {
        id.to_string()
    }
}

impl From<String> for CartLineId {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&str> for CartLineId {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<&ProductId> for CartLineId {
    fn from(id: &ProductId) -> Self {
        Self::Raw(id.clone())
    }
}
