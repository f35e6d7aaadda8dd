//! Crawl-configuration form walkthrough
//!
//! Builds the create form of the crawl-configuration page — a portal picker,
//! an extraction-selector picker, and a portal-scoped seed-URL list — then
//! drives a scripted user session through it and prints what the form would
//! submit.
//!
//! Run with: cargo run -p newsdesk_widgets --example crawler_config_form

use anyhow::Result;
use newsdesk_widgets::prelude::*;

fn render_form() -> Fragment {
    let mut page = Fragment::new();
    let root = page.root();

    page.append(root, el("input").id("portal-search"));
    page.append(
        root,
        el("div")
            .id("portal-dropdown")
            .hidden()
            .child(portal_option("1", "Daily Planet"))
            .child(portal_option("2", "Gotham Gazette"))
            .child(portal_option("3", "Central City Picture News")),
    );
    page.append(root, el("input").id("portal").attr("type", "hidden"));

    page.append(root, el("input").id("selector-search"));
    page.append(
        root,
        el("div")
            .id("selector-dropdown")
            .hidden()
            .child(selector_option("10", "article body"))
            .child(selector_option("11", "headline")),
    );
    page.append(root, el("input").id("item_selector").attr("type", "hidden"));

    page.append(root, el("input").id("seed-url-search"));
    page.append(
        root,
        el("div")
            .id("seed-url-list")
            .child(seed_item("1", "https://dailyplanet.example/world"))
            .child(seed_item("2", "https://gotham.example/crime"))
            .child(seed_item("2", "https://gotham.example/sports")),
    );

    page
}

fn portal_option(value: &str, text: &str) -> ElementNode {
    el("div")
        .class("portal-option")
        .attr("data-value", value)
        .attr("data-text", text)
}

fn selector_option(value: &str, text: &str) -> ElementNode {
    el("div")
        .class("selector-option")
        .attr("data-value", value)
        .attr("data-text", text)
}

fn seed_item(portal: &str, url: &str) -> ElementNode {
    el("label")
        .class("seed-item")
        .attr("data-portal", portal)
        .text(url)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut registry = WidgetRegistry::new(render_form());
    registry.mount(|page| {
        search_select("portal-search", "portal-dropdown", "portal", "portal-option").build(page)
    });
    registry.mount(|page| {
        search_select(
            "selector-search",
            "selector-dropdown",
            "item_selector",
            "selector-option",
        )
        .build(page)
    });
    registry.mount(|page| {
        scoped_list("portal", "seed-url-list", "seed-item")
            .query_field("seed-url-search")
            .scope_attr("data-portal")
            .build(page)
    });

    // Pick a portal by typing and using the keyboard.
    registry.focus("portal-search");
    registry.type_text("portal-search", "got");
    registry.press("portal-search", KeyCode::ArrowDown);
    registry.press("portal-search", KeyCode::Enter);

    // Pick an extraction selector by clicking its option.
    registry.focus("selector-search");
    registry.type_text("selector-search", "head");
    let dropdown = registry.fragment().by_id("selector-dropdown").unwrap();
    let option = registry.fragment().query(dropdown, "selector-option")[1];
    registry.click_element(option);

    // Narrow the seed list further with free text.
    registry.type_text("seed-url-search", "sports");

    let page = registry.fragment();
    let field = |id: &str| page.value(page.by_id(id).unwrap()).to_string();
    println!("portal        = {}", field("portal"));
    println!("item_selector = {}", field("item_selector"));

    let list = page.by_id("seed-url-list").unwrap();
    println!("seed urls:");
    for item in page.query(list, "seed-item") {
        if page.is_visible(item) {
            println!("  {}", page.text_content(item));
        }
    }

    Ok(())
}
