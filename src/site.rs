use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use serde::Deserialize;
use url::Url;

use crate::carousel::Carousel;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteMeta,
    pub organization: String,
    pub campaign: String,
    pub donation: DonationDetails,
    pub contact: ContactDetails,
    pub home_carousel: CarouselConfig,
    pub partner_carousel: CarouselConfig,
    pub copy_ack_ms: u64,
    pub theme_storage_key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
    pub og_description: String,
    pub keywords: String,
    pub locale: String,
    pub tagline: String,
    pub icon: String,
    pub logo: String,
    /// Canonical base URL; `--site-url` takes precedence.
    pub url: Option<Url>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DonationDetails {
    pub pix_key: String,
    pub bank_name: String,
    pub branch: String,
    pub account: String,
    pub tax_id: String,
    pub beneficiary: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    pub phone: String,
    pub whatsapp: String,
    pub email: String,
    pub donation_email: String,
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Slide {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CarouselConfig {
    pub slides: Vec<Slide>,
    pub interval_ms: u64,
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn carousel(&self) -> anyhow::Result<Carousel<Slide>> {
        Carousel::new(self.slides.clone())
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let config: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse site config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, carousel) in [
            ("home_carousel", &self.home_carousel),
            ("partner_carousel", &self.partner_carousel),
        ] {
            if carousel.slides.is_empty() {
                anyhow::bail!("{name} must have at least one slide");
            }
            if carousel.interval_ms == 0 {
                anyhow::bail!("{name}.interval_ms must be greater than zero");
            }
            if !(6000..=8000).contains(&carousel.interval_ms) {
                tracing::warn!(
                    carousel = name,
                    interval_ms = carousel.interval_ms,
                    "carousel interval outside the usual 6-8s range"
                );
            }
        }
        if self.copy_ack_ms == 0 {
            anyhow::bail!("copy_ack_ms must be greater than zero");
        }
        if self.theme_storage_key.trim().is_empty() {
            anyhow::bail!("theme_storage_key must not be empty");
        }
        if self.donation.pix_key.trim().is_empty() {
            anyhow::bail!("donation.pix_key must not be empty");
        }
        Ok(())
    }

    pub fn copy_ack(&self) -> Duration {
        Duration::from_millis(self.copy_ack_ms)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteMeta::default(),
            organization: "Instituto São Pio".to_string(),
            campaign: "Lacre Mais Visão".to_string(),
            donation: DonationDetails::default(),
            contact: ContactDetails::default(),
            home_carousel: CarouselConfig {
                slides: vec![
                    slide("1.png", "Slide 1"),
                    slide("2.png", "Slide 2"),
                    slide("garrafaspetmontinho.jpeg", "Slide 3"),
                ],
                interval_ms: 8000,
            },
            partner_carousel: CarouselConfig {
                slides: vec![slide("instituto_sao_pio.png", "Parceiro 1")],
                interval_ms: 6000,
            },
            copy_ack_ms: 1500,
            theme_storage_key: crate::theme::STORAGE_KEY.to_string(),
        }
    }
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Lacre Mais Visão - Olhar de Amor".to_string(),
            description: "Colete lacres de alumínio e ajude a transformar vidas. Cada lacre doado vira óculos de grau para quem precisa.".to_string(),
            og_description: "Cada lacre doado se transforma em óculos de grau para crianças e pessoas que precisam de uma nova visão.".to_string(),
            keywords: "lacre, doação, solidariedade, óculos, reciclagem, alumínio, visão".to_string(),
            locale: "pt_BR".to_string(),
            tagline: "“Pequenos gestos que transformam grandes futuros”".to_string(),
            icon: "logo_lacre_mais_visao_menor.jpg".to_string(),
            logo: "logo_lacre_mais_visao.jpg".to_string(),
            url: None,
        }
    }
}

impl Default for DonationDetails {
    fn default() -> Self {
        Self {
            pix_key: "29.578.741/0001-36".to_string(),
            bank_name: "Banco 197".to_string(),
            branch: "0001".to_string(),
            account: "423843630".to_string(),
            tax_id: "29.578.741/0001-36".to_string(),
            beneficiary: "Instituto São Pio".to_string(),
        }
    }
}

impl Default for ContactDetails {
    fn default() -> Self {
        Self {
            phone: "+55 65 8445-1308".to_string(),
            whatsapp: "+556584451308".to_string(),
            email: "sadi_os@yahoo.com.br".to_string(),
            donation_email: "presidente@institutosaopio.org.br".to_string(),
            address: "Cuiabá, MT".to_string(),
        }
    }
}

fn slide(src: &str, alt: &str) -> Slide {
    Slide {
        src: src.to_string(),
        alt: alt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SiteConfig::default();
        config.validate().unwrap();
        assert_eq!(config.home_carousel.interval(), Duration::from_secs(8));
        assert_eq!(config.partner_carousel.interval(), Duration::from_secs(6));
        assert_eq!(config.copy_ack(), Duration::from_millis(1500));
        assert_eq!(config.home_carousel.carousel().unwrap().len(), 3);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SiteConfig = serde_json::from_str(
            r#"{
  "donation": { "pix_key": "chave@example.org" },
  "partner_carousel": {
    "slides": [{ "src": "a.png", "alt": "A" }, { "src": "b.png", "alt": "B" }],
    "interval_ms": 7000
  }
}"#,
        )
        .unwrap();
        config.validate().unwrap();
        assert_eq!(config.donation.pix_key, "chave@example.org");
        assert_eq!(config.donation.bank_name, "Banco 197");
        assert_eq!(config.partner_carousel.slides.len(), 2);
        assert_eq!(config.home_carousel.slides.len(), 3);
        assert_eq!(config.theme_storage_key, "theme");
    }

    #[test]
    fn rejects_empty_carousel_and_zero_timers() {
        let mut config = SiteConfig::default();
        config.partner_carousel.slides.clear();
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.home_carousel.interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.copy_ack_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reports_path_on_bad_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("site.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = SiteConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("site.json"));
    }
}
