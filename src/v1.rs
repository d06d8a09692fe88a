//! OAuth 1.0a request signing (HMAC-SHA1).
//!
//! Signing is split in two steps: the parameter set of a request is
//! canonicalized (see [`Parameters`] and [`canonicalize`]), then the
//! signature engine turns it into a base string, a signature and an
//! `Authorization` header (see [`Signer`]).

use percent_encoding::{utf8_percent_encode, AsciiSet};

mod credentials;
mod params;
mod signer;
pub mod values;

pub use credentials::Credentials;
pub use params::{canonicalize, nonce, Parameters};
pub use signer::{
    authorization_header, compute_authorization_header, compute_signature, signature_base,
    SignedContent, Signer,
};

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
//
// Space therefore becomes `%20` and `*` becomes `%2A`; a bare `+` is never
// emitted.
const TARGETS_FOR_PARAMS: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes `input` with the RFC 3986 unreserved set the API verifies
/// signatures with.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, TARGETS_FOR_PARAMS).to_string()
}
