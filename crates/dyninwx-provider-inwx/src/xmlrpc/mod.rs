//! XML-RPC request/response codec for the INWX API.

pub mod request;
pub mod response;

pub use request::{RequestBuilder, XmlRpcMethod};
pub use response::{Envelope, parse_envelope, parse_record_list};
