use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const DOWNLOAD_URL: &str = "https://www.okx.com/download?deeplink=";
const DAPP_URL_SCHEME: &str = "okx://wallet/dapp/url?dappUrl=";

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Download-and-open link for the OKX app. The dapp url is encoded twice:
/// once as a query value of the `okx://` link, once with that whole link.
pub fn deeplink(dapp_url: &str) -> String {
    let target = format!("{DAPP_URL_SCHEME}{}", encode_uri_component(dapp_url));
    format!("{DOWNLOAD_URL}{}", encode_uri_component(&target))
}
