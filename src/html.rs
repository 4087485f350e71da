use std::collections::HashMap;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use url::Url;

use crate::builtin;
use crate::carousel::Carousel;
use crate::clipboard;
use crate::contact::{self, ContactMessage};
use crate::scroll::{self, ScrollShadow};
use crate::site::{CarouselConfig, SiteConfig, Slide};
use crate::theme::{RootClassList, ThemePreference};

const HERO_MASCOT: &str = "logo_lacre_mais_visao_menor.jpg";
const ORGANIZATION_LOGO: &str = "instituto_sao_pio.png";
const MASCOT: &str = "mascote.png";
const MASCOT_DOUBT: &str = "duvida.png";
const FACT_TABS: &str = "lacres_mao.jpeg";
const FACT_BOTTLES: &str = "garrafapet_lacres.png";
const FACT_GLASSES: &str = "meninoculos.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Donation,
    Partners,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Donation, Page::Partners];

    pub fn file_name(self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::Donation => "doacao.html",
            Page::Partners => "parceiros.html",
        }
    }

    fn heading(self) -> Option<&'static str> {
        match self {
            Page::Home => None,
            Page::Donation => Some("Faça sua Doação"),
            Page::Partners => Some("Nossos Parceiros"),
        }
    }

    /// Site-relative images the page references.
    pub fn image_paths(self, config: &SiteConfig) -> Vec<String> {
        let mut paths = vec![config.site.logo.clone(), config.site.icon.clone()];
        match self {
            Page::Home => {
                paths.extend(config.home_carousel.slides.iter().map(|s| s.src.clone()));
                paths.extend(
                    [
                        HERO_MASCOT,
                        ORGANIZATION_LOGO,
                        MASCOT,
                        MASCOT_DOUBT,
                        FACT_TABS,
                        FACT_BOTTLES,
                        FACT_GLASSES,
                    ]
                    .map(String::from),
                );
            }
            Page::Donation => {}
            Page::Partners => {
                paths.extend(config.partner_carousel.slides.iter().map(|s| s.src.clone()));
            }
        }
        paths
    }
}

/// Output references for site images, keyed by site-relative path.
#[derive(Debug, Default)]
pub struct Images {
    map: HashMap<String, String>,
}

impl Images {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, site_path: &str, src: String) {
        self.map.insert(normalize(site_path).to_string(), src);
    }

    pub fn contains(&self, site_path: &str) -> bool {
        self.map.contains_key(normalize(site_path))
    }

    pub fn src<'a>(&'a self, site_path: &'a str) -> &'a str {
        let key = normalize(site_path);
        self.map.get(key).map(String::as_str).unwrap_or(key)
    }
}

fn normalize(site_path: &str) -> &str {
    site_path.trim().trim_start_matches('/')
}

pub enum Stylesheet<'a> {
    Inline(&'a str),
    Linked(&'a str),
}

pub struct PageContext<'a> {
    pub config: &'a SiteConfig,
    pub images: &'a Images,
    pub stylesheet: Stylesheet<'a>,
    pub site_url: Option<&'a Url>,
}

pub fn build_page(page: Page, ctx: &PageContext<'_>) -> anyhow::Result<String> {
    let config = ctx.config;
    let body = match page {
        Page::Home => render_home(ctx)?,
        Page::Donation => render_donation(ctx)?,
        Page::Partners => render_partners(ctx)?,
    };

    let title = match page.heading() {
        Some(heading) => format!("{} | {}", heading, config.site.title),
        None => config.site.title.clone(),
    };
    let canonical = match ctx.site_url {
        Some(base) => Some(base.join(page.file_name())?.to_string()),
        None => None,
    };
    let root_classes = RootClassList::for_preference(ThemePreference::default());
    let header_class = ScrollShadow::mount(0.0).header_class();

    let markup: Markup = html! {
        (DOCTYPE)
        html lang="pt-BR" class=[root_classes.attr()] {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="color-scheme" content="light dark";
                title { (title) }
                meta name="description" content=(config.site.description);
                meta name="keywords" content=(config.site.keywords);
                meta property="og:title" content=(config.site.title);
                meta property="og:description" content=(config.site.og_description);
                meta property="og:type" content="website";
                meta property="og:locale" content=(config.site.locale);
                @if let Some(href) = &canonical {
                    meta property="og:url" content=(href);
                    link rel="canonical" href=(href);
                }
                link rel="icon" href=(ctx.images.src(&config.site.icon));
                @match ctx.stylesheet {
                    Stylesheet::Linked(href) => { link rel="stylesheet" href=(href); }
                    Stylesheet::Inline(css) => { style { (PreEscaped(css)) } }
                }
            }
            body
                data-theme-key=(config.theme_storage_key)
                data-scroll-threshold=(scroll::SHADOW_THRESHOLD_PX)
                data-copy-ack-ms=(config.copy_ack_ms)
            {
                header class=(header_class) {
                    (render_nav(page, ctx))
                }
                (body)
                (render_footer(page, ctx))
                script { (PreEscaped(builtin::RUNTIME_JS)) }
            }
        }
    };
    Ok(markup.into_string())
}

fn section_href(page: Page, id: &str) -> String {
    match page {
        Page::Home => format!("#{id}"),
        _ => format!("{}#{id}", Page::Home.file_name()),
    }
}

fn nav_links(page: Page) -> Vec<(&'static str, String)> {
    vec![
        ("Sobre", section_href(page, "about")),
        ("Como Funciona", section_href(page, "how-it-works")),
        ("Nosso Impacto", section_href(page, "impact")),
        ("Parceiros", Page::Partners.file_name().to_string()),
        ("Doe", Page::Donation.file_name().to_string()),
        ("Contato", section_href(page, "contact")),
    ]
}

fn render_nav(page: Page, ctx: &PageContext<'_>) -> Markup {
    let config = ctx.config;
    let links = nav_links(page);
    let initial_theme = ThemePreference::default();
    html! {
        nav class="container" aria-label="Principal" {
            div class="site-nav" {
                a class="site-logo" href=(Page::Home.file_name()) aria-label="Ir para a Home" {
                    img src=(ctx.images.src(&config.site.logo)) alt=(format!("Logo {}", config.campaign)) height="64";
                }
                div class="nav-links" {
                    @for (label, href) in &links {
                        a href=(href) { (label) }
                    }
                    (theme_toggle(initial_theme))
                }
                button type="button" class="icon-btn menu-toggle" data-menu-toggle aria-controls="mobile-menu" aria-expanded="false" aria-label="Abrir menu" {
                    (icon_menu())
                }
            }
            div id="mobile-menu" class="mobile-menu" hidden {
                @for (label, href) in &links {
                    a href=(href) { (label) }
                }
                (theme_toggle(initial_theme))
            }
        }
    }
}

fn theme_toggle(initial: ThemePreference) -> Markup {
    html! {
        button type="button" class="icon-btn theme-toggle" data-theme-toggle
            aria-label="Alternar tema claro/escuro" title=(initial.title()) {
            span class="icon-sun" { (icon_sun()) }
            span class="icon-moon" { (icon_moon()) }
        }
    }
}

fn render_carousel(
    carousel: &Carousel<Slide>,
    config: &CarouselConfig,
    images: &Images,
    extra_class: Option<&str>,
) -> Markup {
    let class = match extra_class {
        Some(extra) => format!("carousel {extra}"),
        None => "carousel".to_string(),
    };
    let current = carousel.index();
    html! {
        div class=(class) data-carousel data-interval-ms=(config.interval_ms) aria-roledescription="carousel" {
            @for (i, slide) in carousel.slides().iter().enumerate() {
                div class="carousel-slide" data-slide
                    style=(format!("transform: translateX({}%)", carousel.offset_percent(i)))
                    aria-hidden=(if i == current { "false" } else { "true" }) {
                    img src=(images.src(&slide.src)) alt=(slide.alt) loading=(if i == 0 { "eager" } else { "lazy" });
                }
            }
            @if carousel.len() > 1 {
                button type="button" class="carousel-nav carousel-nav--prev" data-prev aria-label="Slide anterior" {
                    (icon_chevron_left())
                }
                button type="button" class="carousel-nav carousel-nav--next" data-next aria-label="Próximo slide" {
                    (icon_chevron_right())
                }
            }
            div class="carousel-dots" {
                @for i in 0..carousel.len() {
                    button type="button"
                        class=(if i == current { "carousel-dot carousel-dot--active" } else { "carousel-dot" })
                        data-goto=(i)
                        aria-label=(format!("Ir para slide {}", i + 1)) {}
                }
            }
        }
    }
}

fn render_home(ctx: &PageContext<'_>) -> anyhow::Result<Markup> {
    let config = ctx.config;
    let images = ctx.images;
    let carousel = config.home_carousel.carousel()?;
    let form_action = contact::form_action(&config.contact.email)?;
    let compose = contact::mailto_link(
        &config.contact.email,
        &ContactMessage {
            subject: format!("Contato pelo site {}", config.campaign),
            ..ContactMessage::default()
        },
    )?;

    Ok(html! {
        div class="page-offset" {}
        (render_carousel(&carousel, &config.home_carousel, images, None))

        section class="section" {
            div class="container grid grid-2" {
                div class="reveal" {
                    p class="tagline" { (config.site.tagline) }
                    p {
                        "O " (config.organization) ", por meio da campanha “" (config.campaign)
                        "”, arrecada lacres de alumínio nas escolas da rede municipal e os reverte em óculos de grau para alunos em vulnerabilidade social que precisam de correção visual. Participe e ajude a transformar pequenos gestos em grandes futuros."
                    }
                    div class="facts" {
                        a class="btn" href="#how-it-works" { "Deposite Aqui" }
                        a class="btn btn--outline" href=(Page::Donation.file_name()) { "Doe Agora" }
                        a class="btn btn--outline" href="#about" { "Saiba Mais" }
                    }
                }
                div class="card reveal" {
                    img src=(images.src(HERO_MASCOT)) alt="Mascote Lacre do Bem" width="160";
                    h3 { "Junte-se ao Movimento!" }
                    p { "Cada lacre arrecadado ajuda a garantir óculos de grau para estudantes da rede municipal." }
                }
            }
        }

        section class="section section--alt" {
            div class="container" {
                h2 class="section-title" { "Realização: " (config.organization) }
                img src=(images.src(ORGANIZATION_LOGO)) alt=(format!("Logo {}", config.organization)) width="320" style="margin: 0 auto";
            }
        }

        section id="about" class="section" {
            div class="container" {
                h2 class="section-title" { "Sobre o " (config.campaign) }
                div class="divider" {}
                p class="section-lead" {
                    "O " (config.organization) ", por meio da campanha “" (config.campaign)
                    "”, realiza a arrecadação de lacres de alumínio nas escolas da rede municipal de ensino, revertendo-os em óculos de grau para alunos em vulnerabilidade social que necessitam de correção visual. A iniciativa une sustentabilidade, solidariedade e educação."
                }
                div class="grid grid-3" {
                    div class="card reveal" {
                        h3 { "Coleta Sustentável" }
                        p { "Promovemos a reciclagem de lacres de alumínio, contribuindo para um mundo mais sustentável e consciente." }
                    }
                    div class="card reveal" {
                        h3 { "Nova Visão" }
                        p { "Cada lacre doado se transforma em óculos, proporcionando uma nova visão de mundo para quem precisa." }
                    }
                    div class="card reveal" {
                        h3 { "Solidariedade e Educação" }
                        p { "Engajamos a comunidade escolar para promover cidadania e inclusão, aliando educação, saúde e sustentabilidade." }
                    }
                }
            }
        }

        section class="section section--alt" {
            div class="container" {
                div class="grid grid-2" {
                    img src=(images.src(MASCOT)) alt="Mascote explicando" width="240";
                    div {
                        h3 class="section-title" { "Você Sabia Que:" }
                        p { "Com " span class="highlight" { "2280 lacres" } ", é possível encher uma garrafa PET de " span class="highlight" { "2 litros" } "?" }
                        p { span class="highlight" { "120 garrafas PET" } " cheias de lacre, equivalem a " span class="highlight" { "80 quilos" } " de alumínio?" }
                        p { span class="highlight" { "80 quilos" } " de lacres são trocados por " span class="highlight" { "10 óculos" } " para doação" }
                        p class="tagline" { "Ou Seja:" }
                    }
                }
                div class="facts" {
                    (fact(images.src(FACT_TABS), "Garrafa PET", "2280 lacres"))
                    span aria-hidden="true" { "→" }
                    (fact(images.src(FACT_BOTTLES), "Reciclagem", "120 Garrafas Pet"))
                    span aria-hidden="true" { "→" }
                    (fact(images.src(FACT_GLASSES), "Óculos", "10 Óculos"))
                }
                p class="section-lead" {
                    "Junte lacres e deposite em alguma das garrafas Pet espalhadas pela cidade. Ajude a campanha "
                    span class="highlight" { "“" (config.campaign) "”" }
                    ", do " (config.organization) "."
                }
            }
        }

        section id="how-it-works" class="section" {
            div class="container" {
                img src=(images.src(MASCOT_DOUBT)) alt="Mascote com dúvida" width="120" style="margin: 0 auto";
                h2 class="section-title" { "Como Funciona" }
                div class="divider" {}
                p class="section-lead" { "Participar é simples! A campanha mobiliza escolas, coleta lacres e garante exames e óculos de grau para estudantes." }
                div class="grid grid-4" {
                    (step(1, "Mobilização nas Escolas", "Palestras e materiais informativos nas escolas da rede municipal sobre a campanha."))
                    (step(2, "Coleta de Lacres", "Cada escola é um ponto de arrecadação: deposite os lacres nas garrafas identificadas."))
                    (step(3, "Triagem Visual", "Realização de exames de vista gratuitos para alunos com possíveis dificuldades visuais."))
                    (step(4, "Transforme Vidas", "Troca dos lacres por óculos de grau junto a parceiros e entrega aos alunos diagnosticados."))
                }
            }
        }

        section id="impact" class="section section--alt" {
            div class="container" {
                h2 class="section-title" { "Nosso Impacto" }
                div class="divider" {}
                p class="section-lead" { "Entenda como a campanha promove inclusão educacional, saúde ocular, sustentabilidade e cidadania, e conheça nossas metas." }
                div class="grid grid-2" {
                    div class="card reveal" {
                        h3 { "Impacto Social Esperado" }
                        ul {
                            li { "Inclusão educacional: melhora do rendimento e redução da evasão por dificuldades visuais." }
                            li { "Saúde ocular: acesso gratuito a diagnóstico e correção visual." }
                            li { "Sustentabilidade: reciclagem de alumínio e educação ambiental." }
                            li { "Cidadania: engajamento da comunidade escolar em ação solidária." }
                            li { "Equidade social: democratização do acesso a óculos de grau." }
                        }
                    }
                    div class="card reveal" {
                        h3 { "Metas" }
                        ul {
                            li { strong { "Curto prazo (6 meses):" } " atender ao menos 300 alunos com exames de vista e doação de óculos." }
                            li { strong { "Médio prazo (12 meses):" } " expandir a campanha para todas as escolas municipais." }
                            li { strong { "Longo prazo:" } " tornar o “" (config.campaign) "” um programa permanente de saúde ocular e educação ambiental." }
                        }
                    }
                }
            }
        }

        section id="collection-points" class="section" {
            div class="container" {
                h2 class="section-title" { "Pontos de Coleta" }
                div class="divider" {}
                p class="section-lead" { "Encontre uma garrafa PET mais próxima de você e faça parte desta corrente do bem." }
                div class="grid grid-3" {
                    div class="card reveal" {
                        h3 { "Escolas da Rede Municipal" }
                        p { "As escolas municipais são os principais pontos de arrecadação de lacres." }
                    }
                    div class="card reveal" {
                        h3 { "Unidades de Saúde Parceiras" }
                        p { "Articulação com a Secretaria Municipal de Saúde para triagem e apoio oftalmológico." }
                    }
                    div class="card reveal" {
                        h3 { "Empresas Parceiras" }
                        p { "Rede de empresas e recicladoras locais comprometidas com responsabilidade social e sustentabilidade." }
                    }
                }
                p style="text-align: center" {
                    a class="btn" href="#contact" { "Encontrar Ponto Mais Próximo" }
                }
            }
        }

        section id="contact" class="section section--alt" {
            div class="container" {
                h2 class="section-title" { "Fale Conosco" }
                div class="divider" {}
                p class="section-lead" { "Tem dúvidas, sugestões ou quer se tornar um parceiro? Fale conosco!" }
                div class="grid grid-2" {
                    div {
                        h3 { "Informações de Contato" }
                        dl class="bank-list" {
                            dt { "Telefone" }
                            dd { a href=(contact::tel_href(&config.contact.phone)) { (config.contact.phone) } }
                            dt { "E-mail" }
                            dd { a href=(format!("mailto:{}", config.contact.email)) { (config.contact.email) } }
                            dt { "Endereço" }
                            dd { (config.contact.address) }
                        }
                    }
                    div class="card" {
                        h3 { "Envie uma Mensagem" }
                        form class="form" action=(form_action) method="post" enctype="text/plain" {
                            div {
                                label for="contact-name" { "Nome" }
                                input id="contact-name" name=(contact::FORM_FIELDS[0]) placeholder="Seu nome";
                            }
                            div {
                                label for="contact-email" { "E-mail" }
                                input id="contact-email" type="email" name=(contact::FORM_FIELDS[1]) placeholder="seu@email.com";
                            }
                            div {
                                label for="contact-subject" { "Assunto" }
                                input id="contact-subject" name=(contact::FORM_FIELDS[2]) placeholder="Assunto da mensagem";
                            }
                            div {
                                label for="contact-message" { "Mensagem" }
                                textarea id="contact-message" name=(contact::FORM_FIELDS[3]) rows="4" placeholder="Digite sua mensagem..." {}
                            }
                            button type="submit" class="btn" { "Enviar Mensagem" }
                        }
                        p class="hint" {
                            "Não abriu seu app de e-mail? "
                            a href=(compose) { "Escreva diretamente para " (config.contact.email) }
                        }
                    }
                }
            }
        }
    })
}

fn fact(src: &str, alt: &str, caption: &str) -> Markup {
    html! {
        div class="fact reveal" {
            img src=(src) alt=(alt) width="160" height="160";
            div class="fact-caption" { (caption) }
        }
    }
}

fn step(number: u8, title: &str, text: &str) -> Markup {
    html! {
        div class="card reveal" {
            span class="step-number" { (number) }
            h3 { (title) }
            p { (text) }
        }
    }
}

fn render_donation(ctx: &PageContext<'_>) -> anyhow::Result<Markup> {
    let config = ctx.config;
    let donation = &config.donation;
    let whatsapp = contact::whatsapp_href(&config.contact.whatsapp)?;
    let bank_rows = [
        ("Banco", donation.bank_name.as_str()),
        ("Agência", donation.branch.as_str()),
        ("Conta", donation.account.as_str()),
    ];

    Ok(html! {
        div class="page-offset" {}
        section class="container" {
            h1 class="section-title" { "Faça sua Doação" }
            p class="section-lead" { "Cada contribuição ajuda a transformar a visão de crianças e adolescentes. Obrigado por apoiar nossa campanha!" }
        }
        section class="section container" {
            div class="grid grid-3" {
                div id="pix" class="card" {
                    h3 { "Doe via PIX" }
                    p { "Copie a " strong { "chave PIX (CNPJ)" } " abaixo e cole no seu app do banco." }
                    div class="key-box" {
                        code { (donation.pix_key) }
                        button type="button" class="btn copy-btn" data-copy=(donation.pix_key) aria-label="Copiar chave PIX" {
                            (icon_copy())
                            span data-copy-label { (clipboard::LABEL_IDLE) }
                        }
                    }
                    p class="hint" {
                        "Dica: no campo de " em { "chave" } " do PIX, selecione " strong { "CNPJ" } " e cole " strong { (donation.pix_key) } "."
                    }
                }
                div id="bank-transfer" class="card" {
                    h3 { "Transferência Bancária" }
                    dl class="bank-list" {
                        @for (label, value) in bank_rows {
                            (copy_row(label, value))
                        }
                        (copy_row(&format!("CNPJ (favorecido: {})", donation.beneficiary), &donation.tax_id))
                    }
                    p class="hint" { "Envie o comprovante por e-mail ou WhatsApp para identificarmos sua doação." }
                }
                div class="card" {
                    h3 { "Fale com a gente" }
                    p { "Tem outra forma de apoiar? Vamos conversar." }
                    div class="facts" {
                        a class="btn" href=(whatsapp.as_str()) target="_blank" rel="noopener noreferrer" { "WhatsApp" }
                        a class="btn btn--outline" href=(format!("mailto:{}", config.contact.donation_email)) { "E-mail" }
                    }
                    p class="hint" {
                        "Também recebemos " strong { "lacres físicos" } ". Veja os "
                        a href=(section_href(Page::Donation, "collection-points")) { "pontos de coleta" } "."
                    }
                }
            }
        }
    })
}

fn copy_row(label: &str, value: &str) -> Markup {
    html! {
        dt { (label) }
        dd {
            span class="bank-value" { (value) }
            button type="button" class="icon-btn copy-btn" data-copy=(value) aria-label=(format!("Copiar {label}")) {
                (icon_copy())
            }
        }
    }
}

fn render_partners(ctx: &PageContext<'_>) -> anyhow::Result<Markup> {
    let config = ctx.config;
    let carousel = config.partner_carousel.carousel()?;
    Ok(html! {
        div class="page-offset" {}
        section class="container" {
            h1 class="section-title" { "Nossos Parceiros" }
            p class="section-lead" { "Quem caminha junto para transformar pequenos gestos em grandes futuros." }
        }
        section class="section container" {
            (render_carousel(&carousel, &config.partner_carousel, ctx.images, Some("carousel--compact")))
        }
    })
}

fn render_footer(page: Page, ctx: &PageContext<'_>) -> Markup {
    let config = ctx.config;
    html! {
        footer class="site-footer" {
            div class="container grid grid-3" {
                div {
                    img src=(ctx.images.src(&config.site.logo)) alt=(format!("Logo {}", config.campaign)) height="64";
                    p { (config.site.tagline) }
                }
                div {
                    h4 { "Links Úteis" }
                    ul {
                        li { a href=(section_href(page, "about")) { "Sobre Nós" } }
                        li { a href=(section_href(page, "how-it-works")) { "Como Funciona" } }
                        li { a href=(section_href(page, "impact")) { "Nosso Impacto" } }
                        li { a href=(Page::Donation.file_name()) { "Doações" } }
                        li { a href=(section_href(page, "contact")) { "Contato" } }
                    }
                }
                div {
                    h4 { "Contato" }
                    ul {
                        li { (config.contact.email) }
                        li { (config.contact.phone) }
                        li { (config.contact.address) }
                    }
                }
            }
            div class="container footer-bottom" {
                p {
                    "© 2024 " (config.campaign) ". Todos os direitos reservados."
                    br;
                    "Desenvolvido com ❤️ por "
                    a href="https://cheorse.com" target="_blank" rel="noopener noreferrer" { "Cheorse" }
                    " para transformar vidas"
                }
            }
        }
    }
}

fn svg_icon(path: &'static str) -> Markup {
    html! {
        svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"
            stroke-linecap="round" stroke-linejoin="round" aria-hidden="true" {
            path d=(path) {}
        }
    }
}

fn icon_sun() -> Markup {
    svg_icon("M12 4V2M12 22v-2M4.93 4.93 3.51 3.51M20.49 20.49l-1.42-1.42M4 12H2M22 12h-2M4.93 19.07l-1.42 1.42M20.49 3.51l-1.42 1.42M12 8a4 4 0 1 0 0 8 4 4 0 0 0 0-8z")
}

fn icon_moon() -> Markup {
    svg_icon("M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z")
}

fn icon_menu() -> Markup {
    svg_icon("M4 6h16M4 12h16M4 18h16")
}

fn icon_copy() -> Markup {
    svg_icon("M8 8h12v12H8zM4 16V4h12")
}

fn icon_chevron_left() -> Markup {
    svg_icon("M15 19l-7-7 7-7")
}

fn icon_chevron_right() -> Markup {
    svg_icon("M9 5l7 7-7 7")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(page: Page, config: &SiteConfig) -> String {
        let images = Images::new();
        let ctx = PageContext {
            config,
            images: &images,
            stylesheet: Stylesheet::Linked("assets/css/site.css"),
            site_url: None,
        };
        build_page(page, &ctx).unwrap()
    }

    #[test]
    fn donation_page_exposes_exact_copy_values() {
        let config = SiteConfig::default();
        let html = render(Page::Donation, &config);
        for value in ["29.578.741/0001-36", "Banco 197", "0001", "423843630"] {
            assert!(html.contains(&format!("data-copy=\"{value}\"")), "{value}");
        }
        assert!(html.contains("https://wa.me/556584451308"));
        assert!(html.contains("data-copy-ack-ms=\"1500\""));
        assert!(html.contains(">Copiar<"));
    }

    #[test]
    fn home_page_renders_carousel_in_initial_state() {
        let config = SiteConfig::default();
        let html = render(Page::Home, &config);
        assert!(html.contains("data-interval-ms=\"8000\""));
        assert!(html.contains("translateX(0%)"));
        assert!(html.contains("translateX(100%)"));
        assert!(html.contains("translateX(200%)"));
        assert!(html.contains("carousel-dot carousel-dot--active"));
        assert!(html.contains("action=\"mailto:sadi_os@yahoo.com.br\""));
        assert!(html.contains("<html lang=\"pt-BR\" class=\"dark\">"));
        assert!(html.contains("data-theme-key=\"theme\""));
        for id in ["about", "how-it-works", "impact", "contact"] {
            assert!(html.contains(&format!("id=\"{id}\"")), "{id}");
        }
    }

    #[test]
    fn single_partner_has_no_arrows() {
        let config = SiteConfig::default();
        let html = render(Page::Partners, &config);
        assert!(html.contains("data-interval-ms=\"6000\""));
        assert!(!html.contains("data-prev"));
        assert!(html.contains("Nossos Parceiros"));
    }

    #[test]
    fn canonical_url_joins_page_name() {
        let config = SiteConfig::default();
        let images = Images::new();
        let base = Url::parse("https://lacre.example.org/site/").unwrap();
        let ctx = PageContext {
            config: &config,
            images: &images,
            stylesheet: Stylesheet::Inline("body{}"),
            site_url: Some(&base),
        };
        let html = build_page(Page::Donation, &ctx).unwrap();
        assert!(html.contains("rel=\"canonical\" href=\"https://lacre.example.org/site/doacao.html\""));
        assert!(html.contains("<style>body{}</style>"));
    }

    #[test]
    fn images_are_looked_up_without_leading_slash() {
        let mut images = Images::new();
        images.insert("/1.png", "assets/img/abc.png".to_string());
        assert_eq!(images.src("1.png"), "assets/img/abc.png");
        assert_eq!(images.src("/1.png"), "assets/img/abc.png");
        assert_eq!(images.src("/missing.png"), "missing.png");
        assert!(images.contains("1.png"));
    }
}
