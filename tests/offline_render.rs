use std::path::{Path, PathBuf};

use lacre_site::{CliArgs, Mode, ProgressMode};
use tempfile::tempdir;
use url::Url;

const PAGES: [&str; 3] = ["index.html", "doacao.html", "parceiros.html"];

const PUBLIC_IMAGES: [&str; 11] = [
    "1.png",
    "2.png",
    "garrafaspetmontinho.jpeg",
    "logo_lacre_mais_visao.jpg",
    "logo_lacre_mais_visao_menor.jpg",
    "instituto_sao_pio.png",
    "mascote.png",
    "duvida.png",
    "lacres_mao.jpeg",
    "garrafapet_lacres.png",
    "meninoculos.jpg",
];

fn png_bytes(seed: u8) -> Vec<u8> {
    // PNG signature plus a distinguishing byte; enough for sniffing.
    vec![
        0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D',
        b'R', seed,
    ]
}

fn jpeg_bytes(seed: u8) -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', seed]
}

fn populate_public(dir: &Path) {
    for (i, name) in PUBLIC_IMAGES.iter().enumerate() {
        let bytes = if name.ends_with(".png") {
            png_bytes(i as u8)
        } else {
            jpeg_bytes(i as u8)
        };
        std::fs::write(dir.join(name), bytes).unwrap();
    }
}

fn args(public: &Path, out: &Path, mode: Mode) -> CliArgs {
    CliArgs {
        config: None,
        public: public.to_path_buf(),
        out: out.to_path_buf(),
        mode,
        css: Vec::new(),
        assets_dir_name: "assets".to_string(),
        site_url: None,
        progress: ProgressMode::Never,
    }
}

fn read_to_string(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

fn assert_no_remote_autoload(html: &str) {
    for pat in [
        "img src=\"http://",
        "img src=\"https://",
        "img src=\"//",
        "img src=\"/",
        "script src=\"http",
        "link rel=\"stylesheet\" href=\"http",
        "<iframe",
    ] {
        assert!(
            !html.contains(pat),
            "unexpected remote autoload pattern {pat} in html"
        );
    }
}

#[tokio::test]
async fn renders_all_pages_in_dir_mode() {
    let public = tempdir().unwrap();
    let out = tempdir().unwrap();
    populate_public(public.path());

    lacre_site::run(args(public.path(), out.path(), Mode::Dir))
        .await
        .unwrap();

    for page in PAGES {
        let html = read_to_string(&out.path().join(page));
        assert!(html.starts_with("<!DOCTYPE html>"), "{page} lacks doctype");
        assert!(html.contains("assets/css/site.css"), "{page} lacks stylesheet link");
        assert!(html.contains("data-theme-toggle"), "{page} lacks theme toggle");
        assert!(html.contains("site-header"), "{page} lacks header");
        assert_no_remote_autoload(&html);
    }
    assert!(out.path().join("assets/css/site.css").exists());

    let home = read_to_string(&out.path().join("index.html"));
    assert!(home.contains("data-carousel"));
    assert!(home.contains("data-interval-ms=\"8000\""));
    assert!(home.contains("assets/img/"));
    assert!(home.contains("mailto:"));

    let donation = read_to_string(&out.path().join("doacao.html"));
    assert!(donation.contains("data-copy=\"29.578.741/0001-36\""));
    assert!(donation.contains("data-copy=\"423843630\""));
    assert!(donation.contains("https://wa.me/556584451308"));

    let partners = read_to_string(&out.path().join("parceiros.html"));
    assert!(partners.contains("data-interval-ms=\"6000\""));

    // Identical images dedupe to a single hashed file.
    let img_dir = out.path().join("assets/img");
    let written = std::fs::read_dir(&img_dir).unwrap().count();
    assert_eq!(written, PUBLIC_IMAGES.len());
}

#[tokio::test]
async fn renders_self_contained_pages_in_single_mode() {
    let public = tempdir().unwrap();
    let out = tempdir().unwrap();
    populate_public(public.path());

    lacre_site::run(args(public.path(), out.path(), Mode::Single))
        .await
        .unwrap();

    for page in PAGES {
        let html = read_to_string(&out.path().join(page));
        assert!(html.contains("<style>"), "{page} should inline its css");
        assert!(!html.contains("assets/css/site.css"));
        assert_no_remote_autoload(&html);
    }
    let home = read_to_string(&out.path().join("index.html"));
    assert!(home.contains("data:image/png;base64,"));
    assert!(home.contains("data:image/jpeg;base64,"));
    assert!(!out.path().join("assets").exists());
}

#[tokio::test]
async fn rewrites_urls_in_extra_stylesheets() {
    let public = tempdir().unwrap();
    let out = tempdir().unwrap();
    let styles = tempdir().unwrap();
    populate_public(public.path());

    std::fs::write(styles.path().join("bg.png"), png_bytes(200)).unwrap();
    std::fs::write(
        styles.path().join("base.css"),
        ".hero { background: url(\"bg.png\"); }\n",
    )
    .unwrap();
    let extra = styles.path().join("extra.css");
    std::fs::write(&extra, "@import \"base.css\";\n.footer { color: teal; }\n").unwrap();

    let mut a = args(public.path(), out.path(), Mode::Dir);
    a.css = vec![extra];
    lacre_site::run(a).await.unwrap();

    let css = read_to_string(&out.path().join("assets/css/site.css"));
    assert!(css.contains(".footer { color: teal; }"));
    assert!(css.contains("url(\"../img/"));
    assert!(!css.contains("@import"));
    assert!(!css.contains("bg.png"));
}

#[tokio::test]
async fn applies_custom_config_and_site_url() {
    let public = tempdir().unwrap();
    let out = tempdir().unwrap();
    populate_public(public.path());

    let config_path: PathBuf = public.path().join("site.json");
    std::fs::write(
        &config_path,
        r#"{
  "donation": { "pix_key": "pix@example.org" },
  "partner_carousel": {
    "slides": [
      { "src": "instituto_sao_pio.png", "alt": "Parceiro 1" },
      { "src": "mascote.png", "alt": "Parceiro 2" }
    ],
    "interval_ms": 7000
  }
}"#,
    )
    .unwrap();

    let mut a = args(public.path(), out.path(), Mode::Dir);
    a.config = Some(config_path);
    a.site_url = Some(Url::parse("https://lacre.example.org/").unwrap());
    lacre_site::run(a).await.unwrap();

    let donation = read_to_string(&out.path().join("doacao.html"));
    assert!(donation.contains("data-copy=\"pix@example.org\""));
    assert!(donation.contains("https://lacre.example.org/doacao.html"));

    let partners = read_to_string(&out.path().join("parceiros.html"));
    assert!(partners.contains("data-interval-ms=\"7000\""));
    assert!(partners.contains("data-next"));
}

#[tokio::test]
async fn missing_image_fails_the_build() {
    let public = tempdir().unwrap();
    let out = tempdir().unwrap();
    populate_public(public.path());
    std::fs::remove_file(public.path().join("mascote.png")).unwrap();

    let err = lacre_site::run(args(public.path(), out.path(), Mode::Dir))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("mascote.png"));
}
