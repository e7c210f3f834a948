use serde::{Deserialize, Serialize};

use crate::utils::uri::encode_uri_component;

/// Typed form input, one variant per supported content type.
///
/// Every field is optional on the wire; missing fields deserialize to empty
/// strings and render as empty segments in the payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentInput {
    Url(UrlInput),
    Wifi(WifiInput),
    Vcard(VcardInput),
    Phone(PhoneInput),
    Sms(SmsInput),
    Email(EmailInput),
    Text(TextInput),
    Event(EventInput),
    Location(LocationInput),
    Crypto(CryptoInput),
    Facebook(LinkInput),
    #[serde(rename = "googleform")]
    GoogleForm(LinkInput),
    Whatsapp(WhatsappInput),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct UrlInput {
    #[serde(alias = "url")]
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WifiInput {
    pub ssid: String,
    pub password: String,
    pub encryption: WifiEncryption,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WifiEncryption {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    NoPass,
}

impl WifiEncryption {
    pub fn as_str(&self) -> &'static str {
        match self {
            WifiEncryption::Wpa => "WPA",
            WifiEncryption::Wep => "WEP",
            WifiEncryption::NoPass => "nopass",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct VcardInput {
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub email: String,
    pub org: String,
    pub job: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PhoneInput {
    pub number: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SmsInput {
    pub number: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EmailInput {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TextInput {
    pub text: String,
}

/// Calendar event; `start`/`end` are local `YYYY-MM-DDTHH:mm` strings.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EventInput {
    pub summary: String,
    pub location: String,
    pub description: String,
    pub start: String,
    pub end: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LocationInput {
    pub latitude: String,
    pub longitude: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CryptoInput {
    pub coin: String,
    pub address: String,
    pub amount: String,
}

impl Default for CryptoInput {
    fn default() -> Self {
        Self {
            coin: String::from("bitcoin"),
            address: String::new(),
            amount: String::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LinkInput {
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WhatsappInput {
    pub number: String,
    pub message: String,
}

impl Default for ContentInput {
    fn default() -> Self {
        ContentInput::Url(UrlInput::default())
    }
}

impl ContentInput {
    /// The content-type key, as used in the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentInput::Url(_) => "url",
            ContentInput::Wifi(_) => "wifi",
            ContentInput::Vcard(_) => "vcard",
            ContentInput::Phone(_) => "phone",
            ContentInput::Sms(_) => "sms",
            ContentInput::Email(_) => "email",
            ContentInput::Text(_) => "text",
            ContentInput::Event(_) => "event",
            ContentInput::Location(_) => "location",
            ContentInput::Crypto(_) => "crypto",
            ContentInput::Facebook(_) => "facebook",
            ContentInput::GoogleForm(_) => "googleform",
            ContentInput::Whatsapp(_) => "whatsapp",
        }
    }

    /// Canonical text that gets encoded into the matrix code.
    ///
    /// Total and pure: any field content, including control characters, yields
    /// a string. Structural fields are inserted verbatim, so reserved
    /// characters such as `;` inside an SSID are not escaped.
    pub fn payload(&self) -> String {
        match self {
            ContentInput::Url(input) => non_empty(&input.text),
            ContentInput::Text(input) => non_empty(&input.text),
            ContentInput::Wifi(input) => format!(
                "WIFI:S:{};T:{};P:{};;",
                input.ssid,
                input.encryption.as_str(),
                input.password
            ),
            ContentInput::Vcard(input) => format!(
                "BEGIN:VCARD\nVERSION:3.0\nN:{last};{first}\nFN:{first} {last}\nORG:{org}\nTITLE:{job}\nTEL;TYPE=CELL:{mobile}\nEMAIL:{email}\nEND:VCARD",
                first = input.first_name,
                last = input.last_name,
                org = input.org,
                job = input.job,
                mobile = input.mobile,
                email = input.email,
            ),
            ContentInput::Phone(input) => format!("tel:{}", input.number),
            ContentInput::Sms(input) => format!("smsto:{}:{}", input.number, input.message),
            ContentInput::Email(input) => format!(
                "mailto:{}?subject={}&body={}",
                input.to,
                encode_uri_component(&input.subject),
                encode_uri_component(&input.body)
            ),
            ContentInput::Event(input) => format!(
                "BEGIN:VEVENT\nSUMMARY:{}\nLOCATION:{}\nDESCRIPTION:{}\nDTSTART:{}\nDTEND:{}\nEND:VEVENT",
                input.summary,
                input.location,
                input.description,
                compact_datetime(&input.start),
                compact_datetime(&input.end)
            ),
            ContentInput::Location(input) => format!("geo:{},{}", input.latitude, input.longitude),
            ContentInput::Crypto(input) => {
                if input.amount.is_empty() {
                    format!("{}:{}", input.coin, input.address)
                } else {
                    format!("{}:{}?amount={}", input.coin, input.address, input.amount)
                }
            }
            ContentInput::Facebook(input) | ContentInput::GoogleForm(input) => input.url.clone(),
            ContentInput::Whatsapp(input) => format!(
                "https://wa.me/{}?text={}",
                digits_only(&input.number),
                encode_uri_component(&input.message)
            ),
        }
    }
}

// Scanners reject zero-length data.
fn non_empty(text: &str) -> String {
    if text.is_empty() {
        String::from(" ")
    } else {
        text.to_string()
    }
}

// iCalendar compact form: 2026-06-01T10:00 -> 20260601T1000. Floating time, no zone suffix.
fn compact_datetime(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '-' | ':')).collect()
}

fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> ContentInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_url_and_text_become_a_single_space() {
        assert_eq!(ContentInput::Url(UrlInput::default()).payload(), " ");
        assert_eq!(ContentInput::Text(TextInput::default()).payload(), " ");
        assert_eq!(parse(json!({"type": "url"})).payload(), " ");
    }

    #[test]
    fn url_and_text_are_verbatim() {
        let url = parse(json!({"type": "url", "text": "https://example.com/?a=b c"}));
        assert_eq!(url.payload(), "https://example.com/?a=b c");

        let aliased = parse(json!({"type": "url", "url": "https://example.com"}));
        assert_eq!(aliased.payload(), "https://example.com");

        let text = parse(json!({"type": "text", "text": "line one\nline two\t;:"}));
        assert_eq!(text.payload(), "line one\nline two\t;:");
    }

    #[test]
    fn wifi_payload() {
        let input = parse(json!({
            "type": "wifi",
            "ssid": "Cafe Net",
            "password": "abc123",
            "encryption": "WPA"
        }));
        assert_eq!(input.payload(), "WIFI:S:Cafe Net;T:WPA;P:abc123;;");
    }

    #[test]
    fn wifi_defaults_to_wpa_and_keeps_reserved_characters() {
        let input = parse(json!({"type": "wifi", "ssid": "a;b"}));
        assert_eq!(input.payload(), "WIFI:S:a;b;T:WPA;P:;;");

        let open = parse(json!({"type": "wifi", "ssid": "Guest", "encryption": "nopass"}));
        assert_eq!(open.payload(), "WIFI:S:Guest;T:nopass;P:;;");
    }

    #[test]
    fn vcard_payload() {
        let input = parse(json!({
            "type": "vcard",
            "firstName": "Jane",
            "lastName": "Doe",
            "mobile": "+15551234567",
            "email": "jane@x.com",
            "org": "Acme",
            "job": "CEO"
        }));
        assert_eq!(
            input.payload(),
            "BEGIN:VCARD\nVERSION:3.0\nN:Doe;Jane\nFN:Jane Doe\nORG:Acme\nTITLE:CEO\nTEL;TYPE=CELL:+15551234567\nEMAIL:jane@x.com\nEND:VCARD"
        );
    }

    #[test]
    fn empty_vcard_keeps_every_line() {
        let payload = ContentInput::Vcard(VcardInput::default()).payload();
        assert_eq!(
            payload,
            "BEGIN:VCARD\nVERSION:3.0\nN:;\nFN: \nORG:\nTITLE:\nTEL;TYPE=CELL:\nEMAIL:\nEND:VCARD"
        );
    }

    #[test]
    fn phone_and_sms() {
        let phone = parse(json!({"type": "phone", "number": "+1 555 0100"}));
        assert_eq!(phone.payload(), "tel:+1 555 0100");

        let sms = parse(json!({"type": "sms", "number": "5550100", "message": "see you at 5"}));
        assert_eq!(sms.payload(), "smsto:5550100:see you at 5");
    }

    #[test]
    fn email_encodes_subject_and_body() {
        let input = parse(json!({
            "type": "email",
            "to": "x@y.com",
            "subject": "Hello World",
            "body": "A & B"
        }));
        assert_eq!(
            input.payload(),
            "mailto:x@y.com?subject=Hello%20World&body=A%20%26%20B"
        );
    }

    #[test]
    fn email_with_empty_fields_keeps_segments() {
        let input = parse(json!({"type": "email", "to": "x@y.com"}));
        assert_eq!(input.payload(), "mailto:x@y.com?subject=&body=");
    }

    #[test]
    fn event_strips_datetime_punctuation() {
        let input = parse(json!({
            "type": "event",
            "summary": "Launch",
            "location": "HQ",
            "description": "Release party",
            "start": "2026-06-01T10:00",
            "end": "2026-06-01T12:30"
        }));
        assert_eq!(
            input.payload(),
            "BEGIN:VEVENT\nSUMMARY:Launch\nLOCATION:HQ\nDESCRIPTION:Release party\nDTSTART:20260601T1000\nDTEND:20260601T1230\nEND:VEVENT"
        );
    }

    #[test]
    fn location_payload() {
        let input = parse(json!({
            "type": "location",
            "latitude": "40.7128",
            "longitude": "-74.0060"
        }));
        assert_eq!(input.payload(), "geo:40.7128,-74.0060");
    }

    #[test]
    fn crypto_amount_suffix_only_when_present() {
        let without = parse(json!({
            "type": "crypto",
            "coin": "bitcoin",
            "address": "bc1qxyz",
            "amount": ""
        }));
        assert_eq!(without.payload(), "bitcoin:bc1qxyz");

        let with = parse(json!({
            "type": "crypto",
            "coin": "ethereum",
            "address": "0xabc",
            "amount": "0.5"
        }));
        assert_eq!(with.payload(), "ethereum:0xabc?amount=0.5");

        let defaulted = parse(json!({"type": "crypto", "address": "bc1q"}));
        assert_eq!(defaulted.payload(), "bitcoin:bc1q");
    }

    #[test]
    fn social_links_are_verbatim() {
        let fb = parse(json!({"type": "facebook", "url": "https://facebook.com/acme"}));
        assert_eq!(fb.payload(), "https://facebook.com/acme");

        let form = parse(json!({"type": "googleform", "url": "https://forms.gle/abc"}));
        assert_eq!(form.payload(), "https://forms.gle/abc");
        assert_eq!(form.kind(), "googleform");
    }

    #[test]
    fn whatsapp_keeps_only_digits() {
        let input = parse(json!({
            "type": "whatsapp",
            "number": "+1 (415) 555-2671",
            "message": "Hi there!"
        }));
        assert_eq!(input.payload(), "https://wa.me/14155552671?text=Hi%20there!");

        let plain = parse(json!({
            "type": "whatsapp",
            "number": "14155552671",
            "message": "Hi there!"
        }));
        assert_eq!(plain.payload(), input.payload());
    }

    #[test]
    fn encoding_is_deterministic() {
        let input = parse(json!({"type": "sms", "number": "1", "message": "\u{0007}bell"}));
        assert_eq!(input.payload(), input.payload());
        assert_eq!(input.payload(), "smsto:1:\u{0007}bell");
    }
}
