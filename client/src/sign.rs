use crate::constants::{
    AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE,
    X_AMZ_SECURITY_TOKEN,
};
use crate::Credential;
use cloud9_ssh_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use cloud9_ssh_core::time::{format_date, format_iso8601, now, DateTime};
use cloud9_ssh_core::{Error, Result, SigningRequest};
use http::header::HeaderName;
use http::request::Parts;
use http::{header, HeaderValue};
use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use std::fmt::Write;

/// RequestSigner that implements AWS SigV4 header signing.
///
/// Pure and reentrant: it only reads its inputs and the wall clock, captured
/// once per call immediately before signing.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
#[derive(Debug)]
pub struct RequestSigner {
    service: String,
    region: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new SigV4 signer for a service/region pair.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub(crate) fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign the request in place, adding the `Authorization` header.
    ///
    /// The request must already carry its payload hash in
    /// `x-amz-content-sha256`; refusing to guess it keeps the signature
    /// bound to the body actually sent.
    pub fn sign(&self, req: &mut Parts, cred: &Credential) -> Result<()> {
        if !cred.is_valid() {
            return Err(Error::credential_invalid(
                "cannot sign request without a complete access key pair",
            ));
        }

        let now = self.time.unwrap_or_else(now);
        let mut signed_req = SigningRequest::build(req)?;

        canonicalize_header(&mut signed_req, cred, now)?;
        canonicalize_query(&mut signed_req);

        // Build canonical request and string to sign.
        let creq = canonical_request_string(&signed_req)?;
        let encoded_req = hex_sha256(creq.as_bytes());

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = format!(
            "{}/{}/{}/aws4_request",
            format_date(now),
            self.region,
            self.service
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let mut string_to_sign = String::new();
        writeln!(string_to_sign, "AWS4-HMAC-SHA256")?;
        writeln!(string_to_sign, "{}", format_iso8601(now))?;
        writeln!(string_to_sign, "{scope}")?;
        write!(string_to_sign, "{encoded_req}")?;
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key =
            generate_signing_key(&cred.secret_access_key, now, &self.region, &self.service);
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
            cred.access_key_id,
            scope,
            signed_req.header_name_to_vec_sorted().join(";"),
            signature
        ))?;
        authorization.set_sensitive(true);

        signed_req
            .headers
            .insert(header::AUTHORIZATION, authorization);

        // Apply to the request.
        signed_req.apply(req)
    }
}

fn canonical_request_string(ctx: &SigningRequest) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", ctx.method)?;
    // Insert encoded path
    let path = percent_decode_str(&ctx.path)
        .decode_utf8()
        .map_err(|e| Error::request_invalid("failed to decode request path").with_source(e))?;
    writeln!(f, "{}", utf8_percent_encode(&path, &AWS_URI_ENCODE_SET))?;
    // Insert query
    writeln!(
        f,
        "{}",
        ctx.query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    )?;
    // Insert signed headers
    let signed_headers = ctx.header_name_to_vec_sorted();
    for name in signed_headers.iter() {
        let value = ctx.headers[*name]
            .to_str()
            .map_err(|e| Error::request_invalid("header value is not valid utf-8").with_source(e))?;
        writeln!(f, "{name}:{value}")?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;

    // The payload hash is mandatory on this service; its presence is
    // enforced in canonicalize_header.
    write!(f, "{}", ctx.headers[X_AMZ_CONTENT_SHA_256].to_str()?)?;

    Ok(f)
}

fn canonicalize_header(ctx: &mut SigningRequest, cred: &Credential, now: DateTime) -> Result<()> {
    // Header names and values need to be normalized according to Step 4 of
    // https://docs.aws.amazon.com/general/latest/gr/sigv4-create-canonical-request.html
    for (_, value) in ctx.headers.iter_mut() {
        SigningRequest::header_value_normalize(value)
    }

    if ctx.headers.get(X_AMZ_CONTENT_SHA_256).is_none() {
        return Err(Error::request_invalid(
            "request is missing its payload hash header",
        ));
    }

    // Insert HOST header if not present.
    if ctx.headers.get(header::HOST).is_none() {
        ctx.headers
            .insert(header::HOST, ctx.authority.as_str().parse()?);
    }

    // Insert DATE header if not present.
    if ctx.headers.get(X_AMZ_DATE).is_none() {
        ctx.headers.insert(
            HeaderName::from_static(X_AMZ_DATE),
            HeaderValue::try_from(format_iso8601(now))?,
        );
    }

    // Insert X_AMZ_SECURITY_TOKEN header if a session token exists.
    if let Some(token) = &cred.session_token {
        let mut value = HeaderValue::from_str(token)?;
        // Set token value sensitive to avoid leaking.
        value.set_sensitive(true);

        ctx.headers
            .insert(HeaderName::from_static(X_AMZ_SECURITY_TOKEN), value);
    }

    Ok(())
}

fn canonicalize_query(ctx: &mut SigningRequest) {
    if ctx.query.is_empty() {
        return;
    }

    // Sort by param name
    ctx.query.sort();

    ctx.query = ctx
        .query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect();
}

fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), "aws4_request".as_bytes())
}
