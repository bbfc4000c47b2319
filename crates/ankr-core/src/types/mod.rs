//! Typed requests and responses for the Advanced API.
//!
//! Field names follow the API's camelCase wire format. Unset optional
//! request fields are omitted from the params object; response structs
//! tolerate missing or `null` members and fill them with empty values.

use serde::{Deserialize, Deserializer};

/// Bind a request and its response to the page-token protocol.
macro_rules! paginated {
    ($request:ty => $response:ty) => {
        impl $crate::rpc::PaginatedRequest for $request {
            fn page_token(&self) -> Option<&str> {
                self.page_token.as_deref()
            }

            fn set_page_token(&mut self, token: String) {
                self.page_token = Some(token);
            }
        }

        impl $crate::rpc::Paginated for $response {
            fn next_page_token(&self) -> Option<&str> {
                self.next_page_token.as_deref()
            }
        }
    };
}

mod chain;
pub mod nft;
pub mod query;
pub mod token;

pub use chain::{BlockRef, Chain, ParseChainError};
pub use nft::*;
pub use query::*;
pub use token::*;

/// Zero means "unset", as on the wire.
fn default_page_size(page_size: &mut Option<u32>, default: u32) {
    if matches!(page_size, None | Some(0)) {
        *page_size = Some(default);
    }
}

/// Drop an explicit zero page size so the server applies its own.
fn clear_zero_page_size(page_size: &mut Option<u32>) {
    if *page_size == Some(0) {
        *page_size = None;
    }
}

fn default_flag(flag: &mut Option<bool>, default: bool) {
    flag.get_or_insert(default);
}

/// Decode `null` as the field's empty value.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
