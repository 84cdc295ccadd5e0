use reqwest::Url;
use storefront_core::{Cart, Product, Variant};

use super::availability::{AvailabilityView, QuantityPolicy};
use super::gate::{PurchaseGate, PurchaseRequest};
use super::resolver::{resolve, selection_for, Resolution, Selection};
use crate::cart::add_item;
use crate::context::WidgetContext;
use crate::error::WidgetError;
use crate::events::AppEvent;
use crate::html::escape_html;
use crate::page::{set_variant_param, variant_param};

/// Product page option pickers with price, stock and purchase actions.
///
/// Holds the selection for one page view. Every selection change re-runs the
/// cascading resolver, re-projects availability and publishes the outcome on
/// the bus.
pub struct VariantSelector {
    ctx: WidgetContext,
    product: Product,
    policy: QuantityPolicy,
    selection: Selection,
    availability: AvailabilityView,
    /// Quantity input as typed.
    quantity_input: String,
    page_url: Url,
}

impl VariantSelector {
    /// Mounts the selector on `page_url`.
    ///
    /// The initial selection comes from the URL's `variant` parameter when it
    /// names one of the product's variants, otherwise from the first variant.
    #[must_use]
    pub fn connect(ctx: WidgetContext, product: Product, page_url: Url) -> Self {
        let policy = QuantityPolicy::from(&ctx.settings.quantity);
        let seeded = variant_param(&page_url)
            .and_then(|id| product.variant(id))
            .or_else(|| product.variants().first())
            .map_or_else(|| vec![None; product.option_count()], selection_for);

        if product.variants().is_empty() {
            tracing::warn!("variant selector mounted without variants");
        }

        let mut selector = Self {
            availability: AvailabilityView::project(None, &policy, &ctx.currency),
            ctx,
            product,
            policy,
            selection: seeded,
            quantity_input: "0".to_string(),
            page_url,
        };
        selector.apply_selection();
        selector
    }

    /// Builds the product from the raw `options` and `variants` attributes.
    #[must_use]
    pub fn from_attributes(
        ctx: WidgetContext,
        options: Option<&str>,
        variants: Option<&str>,
        page_url: Url,
    ) -> Self {
        Self::connect(ctx, Product::from_attributes(options, variants), page_url)
    }

    /// Picks `value` for option `index` (`None` unselects it).
    pub fn select_option(&mut self, index: usize, value: Option<&str>) {
        if index >= self.selection.len() {
            tracing::warn!(index, "option index out of range");
            return;
        }
        self.selection[index] = value.map(str::to_string);
        self.apply_selection();
    }

    /// Records typed quantity input. The raw text is kept for the purchase
    /// gate; listeners receive the clamped value.
    pub fn set_quantity_input(&mut self, raw: &str) {
        raw.clone_into(&mut self.quantity_input);
        self.ctx.bus.emit(AppEvent::VariantChange {
            variant_id: self.selected_variant().map(|v| v.id),
            quantity: self.quantity(),
        });
    }

    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub fn selection(&self) -> &[Option<String>] {
        &self.selection
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution<'_> {
        resolve(
            self.product.variants(),
            self.product.option_count(),
            &self.selection,
        )
    }

    #[must_use]
    pub fn selected_variant(&self) -> Option<&Variant> {
        self.resolution().variant
    }

    #[must_use]
    pub fn availability(&self) -> &AvailabilityView {
        &self.availability
    }

    /// Quantity input after clamping.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.availability.clamp_quantity(&self.quantity_input)
    }

    #[must_use]
    pub fn quantity_input(&self) -> &str {
        &self.quantity_input
    }

    /// Page URL with the `variant` parameter of the last match.
    #[must_use]
    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// Gates the current selection, adds it to the cart, then re-fetches the
    /// cart and announces the new count and the added line.
    ///
    /// # Errors
    ///
    /// [`WidgetError::Rejected`] without any network call when the gate
    /// refuses, or [`WidgetError::Client`] when the add or the follow-up
    /// fetch fails. Either way a danger toast has been published.
    pub async fn add_to_cart(&self) -> Result<Cart, WidgetError> {
        let request = self.gate()?;
        add_item(&self.ctx, request).await
    }

    /// Gates the current selection and returns the checkout permalink to
    /// navigate to.
    ///
    /// # Errors
    ///
    /// [`WidgetError::Rejected`] when the gate refuses.
    pub fn buy_now(&self) -> Result<Url, WidgetError> {
        let request = self.gate()?;
        Ok(self
            .ctx
            .client
            .checkout_url(request.variant_id, request.quantity))
    }

    /// Option pickers, prices, stock label and quantity input.
    #[must_use]
    pub fn render_html(&self) -> String {
        let resolution = self.resolution();
        let mut html = String::from("<div class=\"variant-selector\">");

        for (index, (name, values)) in self
            .product
            .options()
            .iter()
            .zip(&resolution.legal_values)
            .enumerate()
        {
            html.push_str(&format!(
                "<label for=\"option-select-{index}\">{}</label><select id=\"option-select-{index}\" name=\"option-{index}\">",
                escape_html(name)
            ));
            let current = resolution.selection[index].as_deref();
            let placeholder = if current.is_none() { " selected" } else { "" };
            html.push_str(&format!(
                "<option value=\"\"{placeholder}>Select {}</option>",
                escape_html(name)
            ));
            for value in values {
                let selected = if current == Some(*value) { " selected" } else { "" };
                let value = escape_html(value);
                html.push_str(&format!(
                    "<option value=\"{value}\"{selected}>{value}</option>"
                ));
            }
            html.push_str("</select>");
        }

        let view = &self.availability;
        html.push_str(&format!(
            "<span id=\"product-price\">{}</span><span id=\"product-compare-price\">{}</span>",
            view.price.as_deref().unwrap_or_default(),
            view.compare_at_price.as_deref().unwrap_or_default(),
        ));
        html.push_str(&format!(
            "<span id=\"product-available-qty\">({})</span>",
            view.stock.as_str()
        ));
        let disabled = if view.quantity_enabled { "" } else { " disabled" };
        let max = view
            .max_quantity
            .map(|max| format!(" max=\"{max}\""))
            .unwrap_or_default();
        html.push_str(&format!(
            "<input id=\"product-quantity-input\" type=\"number\" min=\"0\" value=\"{}\"{max}{disabled}>",
            self.quantity()
        ));
        html.push_str("</div>");
        html
    }

    /// Runs the gate on the typed input, then caps the accepted quantity at
    /// the projected maximum so the request matches what the view shows.
    fn gate(&self) -> Result<PurchaseRequest, WidgetError> {
        let mut request = PurchaseGate::check(self.selected_variant(), &self.quantity_input)
            .map_err(|rejection| {
                tracing::warn!(reason = %rejection, "purchase rejected");
                self.ctx.toast(rejection.toast(&self.ctx.settings.toast));
                WidgetError::Rejected(rejection)
            })?;
        if let Some(max) = self.availability.max_quantity {
            request.quantity = request.quantity.min(max);
        }
        Ok(request)
    }

    fn apply_selection(&mut self) {
        let resolution = resolve(
            self.product.variants(),
            self.product.option_count(),
            &self.selection,
        );
        let matched = resolution.variant.cloned();
        self.selection = resolution.selection;

        self.availability =
            AvailabilityView::project(matched.as_ref(), &self.policy, &self.ctx.currency);
        self.quantity_input = self.availability.quantity.to_string();

        if let Some(variant) = &matched {
            set_variant_param(&mut self.page_url, variant.id);
            tracing::debug!(variant_id = variant.id, url = %self.page_url, "variant resolved");
            self.ctx.bus.emit(AppEvent::VariantChanged {
                variant_id: variant.id,
            });
        }
        self.ctx.bus.emit(AppEvent::VariantChange {
            variant_id: matched.as_ref().map(|v| v.id),
            quantity: self.availability.quantity,
        });
        if let Some(variant) = matched {
            self.ctx.bus.emit(AppEvent::VariantSelected { variant });
        }
    }
}
