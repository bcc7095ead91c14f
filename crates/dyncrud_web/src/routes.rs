//! HTTP handlers for the listing, the add/edit forms and the delete link.
//!
//! Every state change ends in a `303 See Other` back to `/` carrying one
//! status flag; every other path renders a full HTML page.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use dyncrud_core::{CustomerDraft, CustomerId};
use log::{debug, info};

use crate::error::AppError;
use crate::store::CustomerStore;
use crate::views::{self, render_form, render_listing, FormPage, FormValues, StatusBanners};

pub const INSERTED_LOCATION: &str = "/?msg1=insert";
pub const UPDATED_LOCATION: &str = "/?msg2=update";
pub const DELETED_LOCATION: &str = "/?msg3=delete";

const SALARY_NOTICE: &str = "Salary must be a number.";

/// Decoded query or form pairs in arrival order.
type Pairs = Vec<(String, String)>;

/// Last value wins when a key repeats.
fn last_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .rev()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

#[derive(Debug, Default)]
pub struct ListingParams {
    pub delete_id: Option<String>,
    pub msg1: Option<String>,
    pub msg2: Option<String>,
    pub msg3: Option<String>,
}

impl ListingParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            delete_id: last_value(pairs, "deleteId"),
            msg1: last_value(pairs, "msg1"),
            msg2: last_value(pairs, "msg2"),
            msg3: last_value(pairs, "msg3"),
        }
    }
}

#[derive(Debug, Default)]
pub struct EditParams {
    pub edit_id: Option<String>,
}

impl EditParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            edit_id: last_value(pairs, "editId"),
        }
    }
}

/// Submitted field text; missing fields arrive as empty strings.
#[derive(Debug, Default)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub salary: String,
}

impl CustomerForm {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            name: last_value(pairs, "name").unwrap_or_default(),
            email: last_value(pairs, "email").unwrap_or_default(),
            salary: last_value(pairs, "salary").unwrap_or_default(),
        }
    }

    /// `None` when salary is not a finite number.
    fn to_draft(&self) -> Option<CustomerDraft> {
        let salary = self.salary.trim().parse::<f64>().ok()?;
        if !salary.is_finite() {
            return None;
        }
        Some(CustomerDraft::new(self.name.as_str(), self.email.as_str(), salary))
    }

    fn into_values(self) -> FormValues {
        FormValues {
            name: self.name,
            email: self.email,
            salary: self.salary,
        }
    }
}

/// Lenient id parsing: absent, blank or non-numeric all mean "no id".
pub fn parse_id(raw: Option<&str>) -> Option<CustomerId> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<CustomerId>().ok())
}

/// `GET /`: delete when `deleteId` is usable, otherwise render the table.
pub async fn index(
    State(store): State<CustomerStore>,
    Query(pairs): Query<Pairs>,
) -> Result<Response, AppError> {
    let params = ListingParams::from_pairs(&pairs);
    if let Some(id) = parse_id(params.delete_id.as_deref()) {
        store.run(move |service| service.delete_by_id(id)).await?;
        info!("event=http_request module=web route=delete status=ok id={id}");
        return Ok(Redirect::to(DELETED_LOCATION).into_response());
    }

    let banners = StatusBanners::from_flags(
        params.msg1.as_deref(),
        params.msg2.as_deref(),
        params.msg3.as_deref(),
    );
    let customers = store.run(|service| service.list_all()).await?;
    debug!(
        "event=http_request module=web route=index status=ok rows={} banners={:?}",
        customers.len(),
        banners
    );
    Ok(Html(render_listing(&customers, banners)).into_response())
}

/// `GET /add`
pub async fn add_form() -> Html<String> {
    Html(render_form(&FormPage::add(FormValues::default())))
}

/// `POST /add`
pub async fn add_submit(
    State(store): State<CustomerStore>,
    Form(fields): Form<Pairs>,
) -> Result<Response, AppError> {
    let form = CustomerForm::from_pairs(&fields);
    let Some(draft) = form.to_draft() else {
        return Ok(rejected(FormPage::add(form.into_values())));
    };

    let id = store.run(move |service| service.create(&draft)).await?;
    info!("event=http_request module=web route=add status=ok id={id}");
    Ok(Redirect::to(INSERTED_LOCATION).into_response())
}

/// `GET /edit?editId=N`
pub async fn edit_form(
    State(store): State<CustomerStore>,
    Query(pairs): Query<Pairs>,
) -> Result<Response, AppError> {
    let params = EditParams::from_pairs(&pairs);
    let Some(id) = parse_id(params.edit_id.as_deref()) else {
        return Ok(not_found(params.edit_id.as_deref()));
    };

    match store.run(move |service| service.get_by_id(id)).await? {
        Some(customer) => Ok(Html(render_form(&FormPage::edit(
            customer.id,
            FormValues::from(&customer),
        )))
        .into_response()),
        None => Ok(not_found(params.edit_id.as_deref())),
    }
}

/// `POST /edit?editId=N`; a vanished id still redirects with the flag.
pub async fn edit_submit(
    State(store): State<CustomerStore>,
    Query(pairs): Query<Pairs>,
    Form(fields): Form<Pairs>,
) -> Result<Response, AppError> {
    let params = EditParams::from_pairs(&pairs);
    let form = CustomerForm::from_pairs(&fields);
    let Some(id) = parse_id(params.edit_id.as_deref()) else {
        return Ok(not_found(params.edit_id.as_deref()));
    };
    let Some(draft) = form.to_draft() else {
        return Ok(rejected(FormPage::edit(id, form.into_values())));
    };

    let changed = store.run(move |service| service.update(id, &draft)).await?;
    info!("event=http_request module=web route=edit status=ok id={id} changed={changed}");
    Ok(Redirect::to(UPDATED_LOCATION).into_response())
}

fn rejected(page: FormPage<'_>) -> Response {
    debug!("event=http_request module=web route=form status=rejected reason=salary");
    (
        StatusCode::BAD_REQUEST,
        Html(render_form(&page.with_notice(SALARY_NOTICE))),
    )
        .into_response()
}

fn not_found(raw_id: Option<&str>) -> Response {
    debug!("event=http_request module=web route=edit status=not_found");
    (StatusCode::NOT_FOUND, Html(views::not_found_page(raw_id))).into_response()
}
