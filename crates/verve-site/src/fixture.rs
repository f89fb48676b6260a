//! Page fixture
//!
//! The portfolio landing page as the host would hand it over: parsed DOM
//! plus layout rectangles. Geometry mirrors a 1280px desktop rendering.

use verve_dom::{Document, NodeId, Rect};

pub const PAGE_WIDTH: f32 = 1280.0;

pub struct PageHandles {
    pub toggle: NodeId,
    pub nav_links: Vec<NodeId>,
    pub service_cards: Vec<NodeId>,
    pub stat_numbers: Vec<NodeId>,
    pub form: NodeId,
    pub submit: NodeId,
    pub lazy_img: NodeId,
}

/// Build the landing page: navbar, hero, stats, services, testimonials and
/// the contact section.
pub fn build() -> (Document, PageHandles) {
    let mut doc = Document::new("https://chetnamuzhalda.com/");
    let body = doc.body();

    // ------------------------------------------------------------------
    // Navbar
    // ------------------------------------------------------------------
    let navbar = doc.create_element("nav");
    doc.set_attr(navbar, "class", "navbar");
    doc.append_child(body, navbar);

    let brand = doc.create_element("a");
    doc.set_attr(brand, "class", "nav-brand");
    doc.set_attr(brand, "href", "#home");
    doc.set_text_content(brand, "Chetna Muzhalda");
    doc.append_child(navbar, brand);

    let toggle = doc.create_element("button");
    doc.set_attr(toggle, "class", "hamburger");
    for _ in 0..3 {
        let bar = doc.create_element("span");
        doc.set_attr(bar, "class", "bar");
        doc.append_child(toggle, bar);
    }
    doc.append_child(navbar, toggle);

    let menu = doc.create_element("ul");
    doc.set_attr(menu, "class", "nav-menu");
    doc.append_child(navbar, menu);
    let mut nav_links = Vec::new();
    for (label, href) in [
        ("Home", "#home"),
        ("Services", "#services"),
        ("Results", "#results"),
        ("Contact", "#contact"),
    ] {
        let item = doc.create_element("li");
        let link = doc.create_element("a");
        doc.set_attr(link, "href", href);
        doc.set_text_content(link, label);
        doc.append_child(item, link);
        doc.append_child(menu, item);
        nav_links.push(link);
    }

    // ------------------------------------------------------------------
    // Hero
    // ------------------------------------------------------------------
    let hero = doc.create_element("section");
    doc.set_attr(hero, "class", "hero");
    doc.set_attr(hero, "id", "home");
    doc.append_child(body, hero);

    let pattern = doc.create_element("div");
    doc.set_attr(pattern, "class", "hero-pattern");
    doc.append_child(hero, pattern);

    let headline = doc.create_element("div");
    doc.set_attr(headline, "class", "section-header");
    doc.set_text_content(headline, "Digital marketing that pays for itself");
    doc.append_child(hero, headline);

    let cta = doc.create_element("a");
    doc.set_attr(cta, "class", "btn");
    doc.set_attr(cta, "href", "#contact");
    doc.set_text_content(cta, "Work With Me");
    doc.append_child(hero, cta);

    for title in ["Google Ads", "Meta Ads", "SEO"] {
        let float = doc.create_element("div");
        doc.set_attr(float, "class", "floating-card");
        doc.set_text_content(float, title);
        doc.append_child(hero, float);
    }

    // ------------------------------------------------------------------
    // Stats strip
    // ------------------------------------------------------------------
    let stats = doc.create_element("section");
    doc.set_attr(stats, "class", "stats");
    doc.set_attr(stats, "id", "results");
    doc.append_child(body, stats);
    let mut stat_numbers = Vec::new();
    for value in ["500+", "98.5%", "$1.2M"] {
        let stat = doc.create_element("span");
        doc.set_attr(stat, "class", "stat-number");
        doc.set_text_content(stat, value);
        doc.append_child(stats, stat);
        stat_numbers.push(stat);
    }

    // ------------------------------------------------------------------
    // Services
    // ------------------------------------------------------------------
    let services = doc.create_element("section");
    doc.set_attr(services, "id", "services");
    doc.append_child(body, services);
    let mut cards = Vec::new();
    for title in ["SEO Optimization", "Paid Campaigns", "Conversion Audits"] {
        let card = doc.create_element("div");
        doc.set_attr(card, "class", "service-card");
        doc.set_text_content(card, title);
        doc.append_child(services, card);
        cards.push(card);
    }

    // ------------------------------------------------------------------
    // Testimonials
    // ------------------------------------------------------------------
    let voices = doc.create_element("section");
    doc.set_attr(voices, "id", "testimonials");
    doc.append_child(body, voices);
    let quote = doc.create_element("div");
    doc.set_attr(quote, "class", "testimonial-card");
    doc.set_text_content(quote, "Tripled our qualified leads in one quarter.");
    doc.append_child(voices, quote);

    // ------------------------------------------------------------------
    // Contact
    // ------------------------------------------------------------------
    let contact = doc.create_element("section");
    doc.set_attr(contact, "id", "contact");
    doc.append_child(body, contact);

    let form = doc.create_element("form");
    doc.set_attr(form, "id", "contactForm");
    doc.append_child(contact, form);
    for name in ["name", "email", "project"] {
        let input = doc.create_element("input");
        doc.set_attr(input, "name", name);
        doc.append_child(form, input);
    }
    let submit = doc.create_element("button");
    doc.set_attr(submit, "type", "submit");
    doc.set_attr(submit, "class", "btn btn-primary");
    doc.set_text_content(submit, "Send Message");
    doc.append_child(form, submit);

    let lazy_img = doc.create_element("img");
    doc.set_attr(lazy_img, "class", "portrait lazy");
    doc.set_attr(lazy_img, "data-src", "/img/portrait.webp");
    doc.append_child(contact, lazy_img);

    // ------------------------------------------------------------------
    // Layout from the host renderer
    // ------------------------------------------------------------------
    doc.set_rect(navbar, Rect::new(0.0, 0.0, PAGE_WIDTH, 80.0));
    doc.set_rect(hero, Rect::new(0.0, 0.0, PAGE_WIDTH, 700.0));
    doc.set_rect(pattern, Rect::new(0.0, 0.0, PAGE_WIDTH, 700.0));
    doc.set_rect(headline, Rect::new(340.0, 140.0, 600.0, 80.0));
    doc.set_rect(cta, Rect::new(100.0, 420.0, 180.0, 52.0));
    doc.set_rect(stats, Rect::new(0.0, 700.0, PAGE_WIDTH, 220.0));
    for (index, stat) in stat_numbers.iter().enumerate() {
        doc.set_rect(*stat, Rect::new(120.0 + 360.0 * index as f32, 770.0, 240.0, 48.0));
    }
    doc.set_rect(services, Rect::new(0.0, 1200.0, PAGE_WIDTH, 900.0));
    for (index, card) in cards.iter().enumerate() {
        doc.set_rect(*card, Rect::new(40.0 + 420.0 * index as f32, 1380.0, 380.0, 260.0));
    }
    doc.set_rect(voices, Rect::new(0.0, 2100.0, PAGE_WIDTH, 500.0));
    doc.set_rect(quote, Rect::new(140.0, 2180.0, 1000.0, 240.0));
    doc.set_rect(contact, Rect::new(0.0, 2600.0, PAGE_WIDTH, 900.0));
    doc.set_rect(form, Rect::new(440.0, 2700.0, 400.0, 420.0));
    doc.set_rect(submit, Rect::new(440.0, 3020.0, 180.0, 56.0));
    doc.set_rect(lazy_img, Rect::new(60.0, 2950.0, 400.0, 300.0));

    let handles = PageHandles {
        toggle,
        nav_links,
        service_cards: cards,
        stat_numbers,
        form,
        submit,
        lazy_img,
    };
    (doc, handles)
}
