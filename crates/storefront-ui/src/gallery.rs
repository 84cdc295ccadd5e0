//! Product image gallery that follows the selected variant.

use reqwest::Url;
use storefront_core::attributes::parse_json_list;
use storefront_core::Variant;

use crate::events::AppEvent;
use crate::html::escape_html;
use crate::page::variant_param;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub media_id: u64,
    /// Full-size image shown as the main image when active.
    pub large_src: String,
    pub alt: String,
}

#[derive(Debug, Clone)]
pub struct ImageGallery {
    variants: Vec<Variant>,
    thumbnails: Vec<Thumbnail>,
    active: Option<usize>,
}

impl ImageGallery {
    /// Mounts with the thumbnail matching the page URL's variant active, if
    /// any.
    #[must_use]
    pub fn new(variants: Vec<Variant>, thumbnails: Vec<Thumbnail>, page_url: &Url) -> Self {
        let mut gallery = Self {
            variants,
            thumbnails,
            active: None,
        };
        if let Some(id) = variant_param(page_url) {
            gallery.activate_variant(id);
        }
        gallery
    }

    /// Builds from the raw `variants` attribute.
    #[must_use]
    pub fn from_attributes(variants: Option<&str>, thumbnails: Vec<Thumbnail>, page_url: &Url) -> Self {
        Self::new(parse_json_list(variants, "variants"), thumbnails, page_url)
    }

    /// Reacts to `product:variant:changed`.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::VariantChanged { variant_id } => self.activate_variant(*variant_id),
            _ => false,
        }
    }

    /// Activates the thumbnail showing the variant's featured media. Returns
    /// `false`, leaving the gallery as is, when the variant, its media or a
    /// matching thumbnail is missing.
    pub fn activate_variant(&mut self, variant_id: u64) -> bool {
        let Some(media_id) = self
            .variants
            .iter()
            .find(|v| v.id == variant_id)
            .and_then(|v| v.featured_media.as_ref())
            .map(|media| media.id)
        else {
            return false;
        };
        match self.thumbnails.iter().position(|t| t.media_id == media_id) {
            Some(index) => {
                self.active = Some(index);
                true
            }
            None => {
                tracing::debug!(variant_id, media_id, "no thumbnail for variant media");
                false
            }
        }
    }

    /// Thumbnail click.
    pub fn click_thumbnail(&mut self, index: usize) -> bool {
        if index >= self.thumbnails.len() {
            return false;
        }
        self.active = Some(index);
        true
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn main_image(&self) -> Option<&Thumbnail> {
        self.active.and_then(|index| self.thumbnails.get(index))
    }

    #[must_use]
    pub fn render_html(&self) -> String {
        let main = self.main_image().or_else(|| self.thumbnails.first());
        let mut html = String::from("<div class=\"gallery\">");
        if let Some(main) = main {
            html.push_str(&format!(
                "<img id=\"mainImage\" src=\"{}\" alt=\"{}\" />",
                escape_html(&main.large_src),
                escape_html(&main.alt)
            ));
        }
        html.push_str("<div class=\"thumbs\">");
        for (index, thumb) in self.thumbnails.iter().enumerate() {
            let active = if self.active == Some(index) { " active" } else { "" };
            html.push_str(&format!(
                "<button class=\"thumb{active}\"><img src=\"{src}\" data-large=\"{src}\" data-media-id=\"{id}\" alt=\"{alt}\" /></button>",
                src = escape_html(&thumb.large_src),
                id = thumb.media_id,
                alt = escape_html(&thumb.alt),
            ));
        }
        html.push_str("</div></div>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARIANTS: &str = r#"[
        {"id": 1, "options": ["Red"], "price": 1000, "featured_media": {"id": 501}},
        {"id": 2, "options": ["Blue"], "price": 1000, "featured_media": {"id": 502}},
        {"id": 3, "options": ["Green"], "price": 1000}
    ]"#;

    fn thumbs() -> Vec<Thumbnail> {
        [500, 501, 502]
            .into_iter()
            .map(|id| Thumbnail {
                media_id: id,
                large_src: format!("/media/{id}.jpg"),
                alt: format!("media {id}"),
            })
            .collect()
    }

    fn page(query: &str) -> Url {
        Url::parse(&format!("https://s.test/products/shirt{query}")).unwrap()
    }

    #[test]
    fn url_variant_seeds_active_thumbnail() {
        let gallery = ImageGallery::from_attributes(Some(VARIANTS), thumbs(), &page("?variant=2"));
        assert_eq!(gallery.active_index(), Some(2));
        assert_eq!(
            gallery.main_image().map(|t| t.large_src.as_str()),
            Some("/media/502.jpg")
        );
    }

    #[test]
    fn variant_changed_event_switches_thumbnail() {
        let mut gallery = ImageGallery::from_attributes(Some(VARIANTS), thumbs(), &page(""));
        assert_eq!(gallery.active_index(), None);
        assert!(gallery.handle(&AppEvent::VariantChanged { variant_id: 1 }));
        assert_eq!(gallery.active_index(), Some(1));
        assert!(gallery.render_html().contains("class=\"thumb active\"><img src=\"/media/501.jpg\""));
    }

    #[test]
    fn variant_without_media_keeps_current_image() {
        let mut gallery = ImageGallery::from_attributes(Some(VARIANTS), thumbs(), &page("?variant=1"));
        assert!(!gallery.activate_variant(3));
        assert!(!gallery.activate_variant(99));
        assert_eq!(gallery.active_index(), Some(1));
    }

    #[test]
    fn thumbnail_click_activates_directly() {
        let mut gallery = ImageGallery::from_attributes(None, thumbs(), &page(""));
        assert!(gallery.click_thumbnail(0));
        assert!(!gallery.click_thumbnail(7));
        assert_eq!(gallery.active_index(), Some(0));
    }
}
