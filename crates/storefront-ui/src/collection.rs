//! AJAX collection filtering: the filter form and the product grid it
//! drives, both refreshed through section rendering.

use reqwest::Url;

use crate::context::WidgetContext;
use crate::error::WidgetError;
use crate::events::AppEvent;

pub const FILTERS_SECTION: &str = "main-collection-filters";
pub const GRID_SECTION: &str = "main-collection-product-grid";

const FILTERS_FAILED: &str = "Error updating filters";

/// Submitted state of the filter form: its action path and fields in
/// document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    action: String,
    params: Vec<(String, String)>,
}

impl FilterForm {
    /// `action` is the form's action path, e.g. `/collections/shirts`.
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            params: Vec::new(),
        }
    }

    /// Checkbox change: adds or removes one `name=value` pair.
    pub fn toggle(&mut self, name: &str, value: &str, checked: bool) {
        let present = self
            .params
            .iter()
            .position(|(n, v)| n == name && v == value);
        match (checked, present) {
            (true, None) => self.params.push((name.to_string(), value.to_string())),
            (false, Some(index)) => {
                self.params.remove(index);
            }
            _ => {}
        }
    }

    /// Single-valued field such as `sort_by`. An empty value clears it.
    pub fn set(&mut self, name: &str, value: &str) {
        self.params.retain(|(n, _)| n != name);
        if !value.is_empty() {
            self.params.push((name.to_string(), value.to_string()));
        }
    }

    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Filter sidebar. Each change publishes `filters:changed`, reloads the
/// filter form markup and records the filtered URL in history.
pub struct CollectionFilters {
    ctx: WidgetContext,
    form: FilterForm,
    form_html: Option<String>,
    history: Vec<Url>,
}

impl CollectionFilters {
    #[must_use]
    pub fn new(ctx: WidgetContext, form: FilterForm) -> Self {
        Self {
            ctx,
            form,
            form_html: None,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn form(&self) -> &FilterForm {
        &self.form
    }

    /// Form markup from the last successful refresh.
    #[must_use]
    pub fn form_html(&self) -> Option<&str> {
        self.form_html.as_deref()
    }

    /// URLs pushed to history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Url] {
        &self.history
    }

    /// Toggles a checkbox filter, then refreshes.
    ///
    /// # Errors
    ///
    /// The failed section fetch, after a danger toast.
    pub async fn toggle(&mut self, name: &str, value: &str, checked: bool) -> Result<(), WidgetError> {
        self.form.toggle(name, value, checked);
        self.ctx.bus.emit(AppEvent::FiltersChanged);
        self.refresh().await
    }

    /// Reloads the filter form for the current fields. A response without
    /// the section keeps the current markup.
    ///
    /// # Errors
    ///
    /// The failed section fetch, after a danger toast.
    pub async fn refresh(&mut self) -> Result<(), WidgetError> {
        let result = self
            .ctx
            .client
            .fetch_sections(self.form.action(), self.form.params(), &[FILTERS_SECTION])
            .await;
        let mut sections = match result {
            Ok(sections) => sections,
            Err(e) => {
                tracing::error!(action = self.form.action(), error = %e, "filter refresh failed");
                self.ctx.toast_error(FILTERS_FAILED);
                return Err(e.into());
            }
        };
        if let Some(html) = sections.remove(FILTERS_SECTION).flatten() {
            self.form_html = Some(html);
        }
        match filtered_url(self.ctx.client.origin(), &self.form) {
            Some(url) => self.history.push(url),
            None => tracing::warn!(action = self.form.action(), "filter form action is not a valid path"),
        }
        Ok(())
    }
}

/// Product grid re-rendered whenever the filters change.
pub struct CollectionGrid {
    ctx: WidgetContext,
    html: Option<String>,
}

impl CollectionGrid {
    #[must_use]
    pub fn new(ctx: WidgetContext) -> Self {
        Self { ctx, html: None }
    }

    /// Reacts to `filters:changed` by fetching the grid for `form`'s
    /// current fields. Returns whether the grid markup was replaced.
    ///
    /// # Errors
    ///
    /// The failed section fetch. The grid keeps its markup.
    pub async fn handle(&mut self, event: &AppEvent, form: &FilterForm) -> Result<bool, WidgetError> {
        if *event != AppEvent::FiltersChanged {
            return Ok(false);
        }
        let mut sections = self
            .ctx
            .client
            .fetch_sections(form.action(), form.params(), &[GRID_SECTION])
            .await
            .inspect_err(|e| tracing::error!(error = %e, "product grid refresh failed"))?;
        match sections.remove(GRID_SECTION).flatten() {
            Some(html) => {
                self.html = Some(html);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[must_use]
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }
}

fn filtered_url(origin: &Url, form: &FilterForm) -> Option<Url> {
    let mut url = origin.join(form.action()).ok()?;
    url.set_query(None);
    if !form.params().is_empty() {
        url.query_pairs_mut().extend_pairs(form.params());
    }
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_and_removes_pairs() {
        let mut form = FilterForm::new("/collections/all");
        form.toggle("filter.p.vendor", "Acme", true);
        form.toggle("filter.p.vendor", "Zen", true);
        form.toggle("filter.p.vendor", "Acme", true);
        assert_eq!(form.params().len(), 2);
        form.toggle("filter.p.vendor", "Acme", false);
        assert_eq!(
            form.params(),
            &[("filter.p.vendor".to_string(), "Zen".to_string())]
        );
    }

    #[test]
    fn set_replaces_single_valued_field() {
        let mut form = FilterForm::new("/collections/all");
        form.set("sort_by", "price-ascending");
        form.set("sort_by", "best-selling");
        assert_eq!(
            form.params(),
            &[("sort_by".to_string(), "best-selling".to_string())]
        );
        form.set("sort_by", "");
        assert!(form.params().is_empty());
    }

    #[test]
    fn filtered_url_encodes_params_on_origin() {
        let origin = Url::parse("https://shop.test/").unwrap();
        let mut form = FilterForm::new("/collections/all");
        form.toggle("filter.v.option.size", "X Large", true);
        assert_eq!(
            filtered_url(&origin, &form).unwrap().as_str(),
            "https://shop.test/collections/all?filter.v.option.size=X+Large"
        );
        assert_eq!(
            filtered_url(&origin, &FilterForm::new("/collections/all"))
                .unwrap()
                .as_str(),
            "https://shop.test/collections/all"
        );
    }
}
