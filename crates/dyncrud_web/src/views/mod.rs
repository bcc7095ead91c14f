//! Server-rendered HTML pages.
//!
//! Markup is written with `rsx!` and rendered to a string by `dioxus-ssr`,
//! which escapes every text node and attribute value it emits.

pub mod form;
pub mod listing;

use axum::http::StatusCode;
use dioxus::prelude::*;

pub use form::{render_form, FormPage, FormValues};
pub use listing::{render_listing, StatusBanners};

const PAGE_TITLE: &str = "Dynamic CRUD";
const BOOTSTRAP_CSS: &str = "https://maxcdn.bootstrapcdn.com/bootstrap/4.5.2/css/bootstrap.min.css";
const FONT_AWESOME_CSS: &str = "https://pro.fontawesome.com/releases/v5.10.0/css/all.css";
const JQUERY_JS: &str = "https://ajax.googleapis.com/ajax/libs/jquery/3.5.1/jquery.min.js";
const BOOTSTRAP_JS: &str = "https://maxcdn.bootstrapcdn.com/bootstrap/4.5.2/js/bootstrap.min.js";

/// Shortest decimal form, so `5000.0` prints as `5000`.
pub fn format_salary(salary: f64) -> String {
    salary.to_string()
}

/// Wraps `content` in the shared document shell and renders it.
pub(crate) fn layout(content: Element) -> String {
    let page = rsx! {
        head {
            title { "{PAGE_TITLE}" }
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            link { rel: "stylesheet", href: BOOTSTRAP_CSS }
            link { rel: "stylesheet", href: FONT_AWESOME_CSS }
        }
        body {
            div { class: "card text-center", style: "padding:15px;",
                h4 { "{PAGE_TITLE}" }
            }
            br {}
            br {}
            div { class: "container", {content} }
            script { src: JQUERY_JS }
            script { src: BOOTSTRAP_JS }
        }
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">{}</html>",
        dioxus_ssr::render_element(page)
    )
}

fn back_link() -> Element {
    rsx! {
        a { class: "btn btn-secondary", href: "/", "Back to records" }
    }
}

/// Edit target that does not resolve to a record.
pub fn not_found_page(raw_id: Option<&str>) -> String {
    let requested = raw_id.map(str::trim).filter(|raw| !raw.is_empty());
    layout(rsx! {
        div { class: "alert alert-warning",
            "Record not found. "
            if let Some(raw) = requested {
                "No customer matches id "
                code { "{raw}" }
                "."
            } else {
                "No customer id was given."
            }
        }
        {back_link()}
    })
}

/// Generic failure page; never includes error details.
pub fn error_page(status: StatusCode) -> String {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Error");
    layout(rsx! {
        div { class: "alert alert-danger",
            "{code} {reason}: the request could not be completed."
        }
        {back_link()}
    })
}

#[cfg(test)]
mod tests {
    use super::{error_page, format_salary, not_found_page};
    use axum::http::StatusCode;

    #[test]
    fn salary_drops_trailing_zero_fraction() {
        assert_eq!(format_salary(5000.0), "5000");
        assert_eq!(format_salary(1234.5), "1234.5");
    }

    #[test]
    fn pages_share_the_document_shell() {
        let page = error_page(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Dynamic CRUD</title>"));
        assert!(page.contains("bootstrap.min.css"));
    }

    #[test]
    fn not_found_page_escapes_raw_id() {
        let page = not_found_page(Some("<x>"));
        assert!(page.contains("&lt;x&gt;"));
        assert!(!page.contains("<x>"));
        assert!(not_found_page(None).contains("No customer id"));
        assert!(not_found_page(Some("  ")).contains("No customer id"));
    }

    #[test]
    fn error_page_hides_details() {
        let page = error_page(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(page.contains("500 Internal Server Error"));
    }
}
