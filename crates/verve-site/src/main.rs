//! Verve Site - Main Entry Point
//!
//! Scripted visit to the portfolio page: load, scroll, open the menu,
//! animate the stats, submit the contact form and ride the notification
//! out, all against the virtual clock.

mod fixture;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use verve_dom::{Document, Viewport};
use verve_page::{Event, Key, LoadTiming, PageController};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Verve site session...");

    let (mut doc, handles) = fixture::build();
    let origin = doc.origin().context("page URL has no origin")?;
    let mut page = PageController::new(Viewport::new(fixture::PAGE_WIDTH, 720.0));
    page.attach(&mut doc);
    println!("Verve engine attached to {}", origin);

    // The load event: timing log plus the background worker
    page.dispatch(
        &mut doc,
        Event::Loaded {
            timing: LoadTiming {
                navigation_start: 0.0,
                load_event_start: 180.0,
                load_event_end: 245.0,
            },
        },
    );
    println!("Worker registrations: {}", page.worker_registrations().len());

    let ld_script = doc
        .query("script[type=\"application/ld+json\"]")
        .context("structured data script missing")?;
    println!(
        "Structured data injected: {} bytes",
        doc.text_content(ld_script).len()
    );

    let headline = doc.query(".section-header").context("headline missing")?;
    println!(
        "Headline revealed on first paint: {}",
        doc.has_class(headline, "fade-in-up")
    );
    println!();

    // ------------------------------------------------------------------
    // Scroll down to the stats strip
    // ------------------------------------------------------------------
    let navbar = doc.query(".navbar").context("navbar missing")?;
    let pattern = doc.query(".hero-pattern").context("hero pattern missing")?;
    let to_top = doc.query(".scroll-to-top").context("scroll-to-top missing")?;

    page.dispatch(&mut doc, Event::Scroll { y: 120.0 });
    println!(
        "Navbar classes at 120px: {}",
        doc.attr(navbar, "class").unwrap_or("")
    );

    page.dispatch(&mut doc, Event::Scroll { y: 600.0 });
    println!(
        "Scroll-to-top button at 600px: opacity {}, visibility {}",
        doc.style(to_top, "opacity").unwrap_or("?"),
        doc.style(to_top, "visibility").unwrap_or("?")
    );
    println!(
        "Hero pattern parallax: {}",
        doc.style(pattern, "transform").unwrap_or("?")
    );

    // The stats strip is on screen now, so the counters are running
    let mut now: u64 = 450;
    page.step(&mut doc, now);
    println!("Stats mid-animation: {}", stat_line(&doc, &handles));
    now = 2500;
    page.step(&mut doc, now);
    println!("Stats settled:       {}", stat_line(&doc, &handles));
    println!("Timers left after settle: {}", page.has_pending_timers());
    println!();

    // ------------------------------------------------------------------
    // Menu, focus wrap, Escape
    // ------------------------------------------------------------------
    page.dispatch(&mut doc, Event::Click { target: handles.toggle, x: 1220.0, y: 40.0 });
    println!(
        "Menu open: {} (aria-expanded {})",
        page.is_nav_open(),
        doc.attr(handles.toggle, "aria-expanded").unwrap_or("?")
    );

    doc.focus(handles.nav_links[3]);
    let reaction = page.dispatch(&mut doc, Event::KeyDown { key: Key::Tab, shift: false });
    let focused = doc.active_element().context("focus lost inside the menu")?;
    println!(
        "Tab on the last link wrapped to \"{}\" (prevented: {})",
        doc.text_content(focused),
        reaction.default_prevented
    );

    page.dispatch(&mut doc, Event::KeyDown { key: Key::Escape, shift: false });
    println!("Escape closed the menu: {}", !page.is_nav_open());
    println!();

    // ------------------------------------------------------------------
    // Anchor navigation to the services grid
    // ------------------------------------------------------------------
    page.dispatch(&mut doc, Event::Click { target: handles.nav_links[1], x: 300.0, y: 40.0 });
    let trace = animate_scroll(&mut page, &mut doc, &mut now);
    println!("Animated scroll to #services: {}", trace);
    let card = handles.service_cards[0];
    println!(
        "First service card classes: {}",
        doc.attr(card, "class").unwrap_or("")
    );

    page.dispatch(&mut doc, Event::PointerEnter { target: card });
    println!(
        "Hover lift: {}",
        doc.style(card, "transform").unwrap_or("?")
    );
    page.dispatch(&mut doc, Event::PointerLeave { target: card });
    println!();

    // ------------------------------------------------------------------
    // Down to the contact section
    // ------------------------------------------------------------------
    page.dispatch(&mut doc, Event::Click { target: handles.nav_links[3], x: 520.0, y: 40.0 });
    let trace = animate_scroll(&mut page, &mut doc, &mut now);
    println!("Animated scroll to #contact: {}", trace);
    println!(
        "Portrait promoted: src={} classes={}",
        doc.attr(handles.lazy_img, "src").unwrap_or("?"),
        doc.attr(handles.lazy_img, "class").unwrap_or("")
    );
    println!();

    // ------------------------------------------------------------------
    // Contact form: rejection, then a real submission
    // ------------------------------------------------------------------
    page.dispatch(&mut doc, Event::Submit { form: handles.form });
    println!("Empty submit: {}", notification_line(&doc, &page)?);

    for (name, value) in [
        ("name", "Jordan Blake"),
        ("email", "jordan@blakeandco.com"),
        ("project", "Product launch campaign for Q4"),
    ] {
        let field = doc
            .query(&format!("input[name=\"{}\"]", name))
            .with_context(|| format!("missing {} field", name))?;
        doc.set_attr(field, "value", value);
    }

    page.dispatch(&mut doc, Event::Click { target: handles.submit, x: 530.0, y: 528.0 });
    if let Some(ripple) = doc.children(handles.submit).last() {
        println!(
            "Ripple on the submit button: {} wide",
            doc.style(ripple, "width").unwrap_or("?")
        );
    }

    page.dispatch(&mut doc, Event::Submit { form: handles.form });
    println!(
        "Submitting: button reads \"{}\", disabled: {}",
        doc.text_content(handles.submit),
        doc.attr(handles.submit, "disabled").is_some()
    );

    now += 500;
    page.step(&mut doc, now);
    println!("After 500ms, still delivering: {}", page.is_form_submitting());

    now += 1500;
    page.step(&mut doc, now);
    println!("Delivered: {}", notification_line(&doc, &page)?);
    println!(
        "Button restored to \"{}\", name field now {:?}",
        doc.text_content(handles.submit),
        doc.query("input[name=\"name\"]").and_then(|f| doc.attr(f, "value"))
    );

    now += 200;
    page.step(&mut doc, now);
    let card = page.notification().context("notification vanished early")?;
    println!(
        "Notification slid in: transform {}",
        doc.style(card, "transform").unwrap_or("?")
    );

    let close = doc.query(".notification-close").context("close button missing")?;
    page.dispatch(&mut doc, Event::Click { target: close, x: 1240.0, y: 120.0 });
    now += 300;
    page.step(&mut doc, now);
    println!("Closed by hand, notification gone: {}", page.notification().is_none());
    println!();

    // ------------------------------------------------------------------
    // Back to the top
    // ------------------------------------------------------------------
    now = 12_000;
    page.step(&mut doc, now);
    page.dispatch(&mut doc, Event::Click { target: to_top, x: 1228.0, y: 668.0 });
    let trace = animate_scroll(&mut page, &mut doc, &mut now);
    println!("Scroll-to-top: {}", trace);
    println!(
        "Navbar classes at the top: {}",
        doc.attr(navbar, "class").unwrap_or("")
    );
    println!();

    println!("Session complete after {} virtual ms", now);
    println!("Final scroll position: {:.0}px", page.scroll_y());
    println!("Pending timers: {}", page.has_pending_timers());
    Ok(())
}

/// Advance the clock in 100ms frames until the animated scroll settles,
/// returning the scroll positions seen along the way.
fn animate_scroll(page: &mut PageController, doc: &mut Document, now: &mut u64) -> String {
    let mut trace = Vec::new();
    while page.is_scroll_animating() {
        *now += 100;
        page.step(doc, *now);
        trace.push(format!("{:.1}", page.scroll_y()));
    }
    trace.join(", ")
}

fn stat_line(doc: &Document, handles: &fixture::PageHandles) -> String {
    let stats: Vec<String> = handles
        .stat_numbers
        .iter()
        .map(|&stat| doc.text_content(stat))
        .collect();
    stats.join(" | ")
}

fn notification_line(doc: &Document, page: &PageController) -> anyhow::Result<String> {
    let card = page.notification().context("no notification on screen")?;
    let message = doc
        .query(".notification-message")
        .context("notification message missing")?;
    Ok(format!(
        "[{}] {}",
        doc.attr(card, "class").unwrap_or(""),
        doc.text_content(message)
    ))
}
