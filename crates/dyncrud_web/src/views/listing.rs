//! Record table with one-shot status banners.

use dioxus::prelude::*;
use dyncrud_core::Customer;

use super::{format_salary, layout};

const DELETE_CONFIRMATION: &str = "return confirm('Are you sure want to delete this record')";

/// Banners requested by the `msg1`/`msg2`/`msg3` query flags.
///
/// Each flag is an independent presence check; its value is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusBanners {
    pub inserted: bool,
    pub updated: bool,
    pub deleted: bool,
}

impl StatusBanners {
    pub fn from_flags(msg1: Option<&str>, msg2: Option<&str>, msg3: Option<&str>) -> Self {
        Self {
            inserted: msg1.is_some(),
            updated: msg2.is_some(),
            deleted: msg3.is_some(),
        }
    }
}

pub fn render_listing(customers: &[Customer], banners: StatusBanners) -> String {
    layout(rsx! {
        if banners.inserted {
            {banner("alert-success", "Customer added successfully")}
        }
        if banners.updated {
            {banner("alert-info", "Customer updated successfully")}
        }
        if banners.deleted {
            {banner("alert-danger", "Customer deleted successfully")}
        }
        h2 {
            "View Records"
            a { href: "/add", style: "float:right;",
                button { class: "btn btn-success",
                    i { class: "fas fa-plus" }
                }
            }
        }
        table { class: "table table-hover",
            thead {
                tr {
                    th { "Id" }
                    th { "Name" }
                    th { "Email" }
                    th { "Salary" }
                    th { "Action" }
                }
            }
            tbody {
                for customer in customers {
                    {customer_row(customer)}
                }
            }
        }
    })
}

fn banner(class: &str, message: &str) -> Element {
    rsx! {
        div { class: "alert {class} alert-dismissible",
            button { r#type: "button", class: "close", "data-dismiss": "alert", "×" }
            "{message}"
        }
    }
}

fn customer_row(customer: &Customer) -> Element {
    let id = customer.id;
    let name = &customer.name;
    let email = &customer.email;
    let salary = format_salary(customer.salary);
    rsx! {
        tr { key: "{id}", "data-id": "{id}",
            td { "{id}" }
            td { "{name}" }
            td { "{email}" }
            td { "{salary}" }
            td {
                a { class: "btn btn-primary mr-2", href: "/edit?editId={id}",
                    i { class: "fa fa-pencil text-white", "aria-hidden": "true" }
                }
                a {
                    class: "btn btn-danger",
                    href: "/?deleteId={id}",
                    "onclick": DELETE_CONFIRMATION,
                    i { class: "fa fa-trash text-white", "aria-hidden": "true" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{render_listing, StatusBanners};
    use dyncrud_core::Customer;

    fn alice() -> Customer {
        Customer {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            salary: 5000.0,
        }
    }

    #[test]
    fn empty_store_renders_header_only() {
        let page = render_listing(&[], StatusBanners::default());
        assert!(page.contains("<th>Salary</th>"));
        assert!(!page.contains("data-id="));
        assert!(!page.contains("alert-dismissible"));
    }

    #[test]
    fn rows_carry_edit_and_confirmed_delete_links() {
        let page = render_listing(&[alice()], StatusBanners::default());
        assert!(page.contains("<td>Alice</td>"));
        assert!(page.contains("<td>5000</td>"));
        assert!(page.contains("href=\"/edit?editId=1\""));
        assert!(page.contains("href=\"/?deleteId=1\""));
        assert!(page.contains("onclick=\"return confirm("));
    }

    #[test]
    fn record_text_is_escaped() {
        let mut customer = alice();
        customer.name = "<script>alert(1)</script>".to_string();
        let page = render_listing(&[customer], StatusBanners::default());
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>alert(1)"));
    }

    #[test]
    fn flags_are_presence_only() {
        let banners = StatusBanners::from_flags(Some(""), None, Some("anything"));
        assert_eq!(
            banners,
            StatusBanners {
                inserted: true,
                updated: false,
                deleted: true,
            }
        );

        let page = render_listing(&[], banners);
        assert!(page.contains("Customer added successfully"));
        assert!(!page.contains("Customer updated successfully"));
        assert!(page.contains("Customer deleted successfully"));
    }
}
