use anyhow::Context as _;
use url::Url;
use url::form_urlencoded::byte_serialize;

/// Field names the contact form posts into the mail body.
pub const FORM_FIELDS: [&str; 4] = ["nome", "email", "assunto", "mensagem"];

#[derive(Debug, Clone, Default)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            (FORM_FIELDS[0], self.name.as_str()),
            (FORM_FIELDS[1], self.email.as_str()),
            (FORM_FIELDS[2], self.subject.as_str()),
            (FORM_FIELDS[3], self.message.as_str()),
        ]
    }

    /// Flat `key=value` lines, the shape a `text/plain` form submission produces.
    pub fn plain_body(&self) -> String {
        self.fields()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("\r\n")
    }
}

/// `action` for the contact `<form>`.
pub fn form_action(recipient: &str) -> anyhow::Result<String> {
    let url = mailto(recipient)?;
    Ok(url.to_string())
}

/// Pre-filled compose link; subject and body are percent-encoded.
pub fn mailto_link(recipient: &str, message: &ContactMessage) -> anyhow::Result<String> {
    let base = mailto(recipient)?;
    let mut query = Vec::new();
    if !message.subject.is_empty() {
        query.push(format!("subject={}", encode_component(&message.subject)));
    }
    query.push(format!("body={}", encode_component(&message.plain_body())));
    Ok(format!("{}?{}", base, query.join("&")))
}

pub fn tel_href(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{digits}")
}

/// WhatsApp click-to-chat link; wa.me wants digits only.
pub fn whatsapp_href(phone: &str) -> anyhow::Result<Url> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        anyhow::bail!("whatsapp number {phone:?} has no digits");
    }
    Url::parse(&format!("https://wa.me/{digits}")).context("build wa.me url")
}

fn mailto(recipient: &str) -> anyhow::Result<Url> {
    let recipient = recipient.trim();
    if recipient.is_empty() || !recipient.contains('@') {
        anyhow::bail!("invalid e-mail recipient {recipient:?}");
    }
    Url::parse(&format!("mailto:{recipient}"))
        .with_context(|| format!("build mailto for {recipient}"))
}

// Mail clients do not decode `+` as space in mailto links.
fn encode_component(raw: &str) -> String {
    byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_action_is_plain_mailto() {
        assert_eq!(
            form_action("sadi_os@yahoo.com.br").unwrap(),
            "mailto:sadi_os@yahoo.com.br"
        );
        assert!(form_action("not-an-address").is_err());
    }

    #[test]
    fn mailto_link_encodes_fields() {
        let msg = ContactMessage {
            name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            subject: "Ponto de coleta + parceria".to_string(),
            message: "Olá!".to_string(),
        };
        let link = mailto_link("sadi_os@yahoo.com.br", &msg).unwrap();
        assert!(link.starts_with("mailto:sadi_os@yahoo.com.br?subject=Ponto%20de%20coleta%20%2B%20parceria&body="));
        assert!(link.contains("nome%3DAna%20Souza%0D%0Aemail%3Dana%40example.com"));
        assert!(!link.contains(' '));
    }

    #[test]
    fn plain_body_uses_form_field_names() {
        let msg = ContactMessage {
            name: "A".into(),
            email: "b@c".into(),
            subject: "S".into(),
            message: "M".into(),
        };
        assert_eq!(msg.plain_body(), "nome=A\r\nemail=b@c\r\nassunto=S\r\nmensagem=M");
    }

    #[test]
    fn phone_links() {
        assert_eq!(tel_href("+55 65 8445-1308"), "tel:+556584451308");
        assert_eq!(
            whatsapp_href("+556584451308").unwrap().as_str(),
            "https://wa.me/556584451308"
        );
        assert!(whatsapp_href("n/a").is_err());
    }
}
