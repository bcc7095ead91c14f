//! Add and edit forms.
//!
//! Fields are plain text inputs; the only server-side check is that salary
//! parses as a number.

use dioxus::prelude::*;
use dyncrud_core::{Customer, CustomerId};

use super::{format_salary, layout};

/// Raw field text as typed or as loaded from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub salary: String,
}

impl From<&Customer> for FormValues {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            salary: format_salary(customer.salary),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormPage<'a> {
    pub heading: &'a str,
    /// Submission target, including any `editId` query.
    pub action: String,
    pub submit_label: &'a str,
    pub values: FormValues,
    /// Shown above the fields when a submission was rejected.
    pub notice: Option<&'a str>,
}

impl<'a> FormPage<'a> {
    pub fn add(values: FormValues) -> Self {
        Self {
            heading: "Add Customer",
            action: "/add".to_string(),
            submit_label: "Add",
            values,
            notice: None,
        }
    }

    pub fn edit(id: CustomerId, values: FormValues) -> Self {
        Self {
            heading: "Edit Customer",
            action: format!("/edit?editId={id}"),
            submit_label: "Update",
            values,
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: &'a str) -> Self {
        self.notice = Some(notice);
        self
    }
}

pub fn render_form(page: &FormPage<'_>) -> String {
    let heading = page.heading;
    let action = page.action.as_str();
    let submit_label = page.submit_label;
    layout(rsx! {
        h2 { "{heading}" }
        if let Some(notice) = page.notice {
            div { class: "alert alert-warning", "{notice}" }
        }
        form { method: "post", action: action,
            {field("name", "Name", &page.values.name)}
            {field("email", "Email", &page.values.email)}
            {field("salary", "Salary", &page.values.salary)}
            button { r#type: "submit", class: "btn btn-primary", "{submit_label}" }
            a { class: "btn btn-secondary", href: "/", "Cancel" }
        }
    })
}

fn field(name: &str, label: &str, value: &str) -> Element {
    rsx! {
        div { class: "form-group",
            label { r#for: name, "{label}" }
            input {
                r#type: "text",
                class: "form-control",
                id: name,
                name: name,
                value: value,
            }
        }
    }
}
