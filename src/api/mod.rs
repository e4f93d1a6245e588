//! CoinGecko API boundary.
//!
//! Builds [`ApiRequest`] descriptions for the market list and coin detail
//! endpoints and decodes their responses into domain records. Transport is left
//! to the Zellij host.
//!
//! - [`request`]: URL, header and correlation-context construction
//! - [`response`]: status checks and JSON decoding

pub mod request;
pub mod response;

pub use request::{ApiClient, ApiRequest, RequestContext, DEFAULT_BASE_URL, DEFAULT_PER_PAGE};
pub use response::{decode_detail, decode_markets, HttpResponse};
