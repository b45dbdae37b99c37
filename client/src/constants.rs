use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Service identity.
pub const SERVICE: &str = "cloud9";
pub const OPERATION_PREFIX: &str = "AWSCloud9WorkspaceManagementService";
pub const AWS_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

// Headers used on signed calls.
pub const X_AMZ_TARGET: &str = "x-amz-target";
pub const X_AMZ_DATE: &str = "x-amz-date";
pub const X_AMZ_CONTENT_SHA_256: &str = "x-amz-content-sha256";
pub const X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";

// Env values consumed by `Config::from_env`.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
pub const AWS_REGION: &str = "AWS_REGION";

/// Maximum number of environment ids DescribeEnvironments accepts per call.
pub const DESCRIBE_BATCH_LIMIT: usize = 25;

/// AsciiSet for [AWS UriEncode](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html)
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static AWS_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Same set, but used for query values.
pub static AWS_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
