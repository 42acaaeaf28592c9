//! Feed-to-domain conversion functions.
//!
//! Repairs the tolerant wire types into clean domain types: placeholder
//! imagery, price extraction, default variants. Products without a usable id
//! are dropped; everything else is patched rather than rejected, because
//! feed quality is the upstream catalog's problem, not a reason to show an
//! empty shop.

use std::sync::OnceLock;

use regex::Regex;

use prickly_pear_core::types::{Image, Product, ProductVariant};

use super::feed::{FeedImage, FeedPrice, FeedProduct, FeedVariant};

/// Shown when a product carries no usable image.
const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/500?text=No+Image";

fn html_tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("static pattern compiles"))
}

/// Drop HTML tags and surrounding whitespace from a feed description.
fn strip_html(input: &str) -> String {
    html_tag_regex().replace_all(input, "").trim().to_string()
}

/// Convert a whole feed, dropping products without an id.
#[must_use]
pub fn convert_products(feed: Vec<FeedProduct>) -> Vec<Product> {
    feed.into_iter().filter_map(convert_product).collect()
}

fn convert_product(product: FeedProduct) -> Option<Product> {
    let id = product.id.filter(|id| !id.is_empty())?;

    let main_image_url = product
        .images
        .first()
        .and_then(|image| image.url.as_deref())
        .filter(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE_URL)
        .to_string();

    let mut variants: Vec<ProductVariant> = product
        .variants
        .into_iter()
        .filter_map(|variant| convert_variant(variant, &product.images, &main_image_url))
        .collect();

    if variants.is_empty() {
        variants.push(ProductVariant {
            id: "default".to_string(),
            title: "Default".to_string(),
            price: "0.00".to_string(),
            available: true,
            image: Some(Image::new(&main_image_url)),
        });
    }

    let raw_description = product
        .description_html
        .or(product.description)
        .unwrap_or_default();
    let description = strip_html(&raw_description);

    Some(Product {
        id,
        title: product.title.unwrap_or_else(|| "Untitled".to_string()),
        description: if description.is_empty() {
            "No description".to_string()
        } else {
            description
        },
        image: Image::new(&main_image_url),
        variants,
    })
}

fn convert_variant(
    variant: FeedVariant,
    images: &[FeedImage],
    main_image_url: &str,
) -> Option<ProductVariant> {
    let id = variant.id.filter(|id| !id.is_empty())?;

    // Resolve the variant's own image by id, falling back to the main image.
    let image_url = variant
        .image
        .as_ref()
        .and_then(|image_ref| image_ref.id.as_deref())
        .and_then(|ref_id| {
            images
                .iter()
                .find(|image| image.id.as_deref() == Some(ref_id))
        })
        .and_then(|image| image.url.as_deref())
        .filter(|url| !url.is_empty())
        .unwrap_or(main_image_url)
        .to_string();

    Some(ProductVariant {
        id,
        title: variant.title.unwrap_or_else(|| "Default".to_string()),
        price: extract_price(variant.price),
        available: variant.available_for_sale.unwrap_or(true),
        image: Some(Image::new(image_url)),
    })
}

fn extract_price(price: Option<FeedPrice>) -> String {
    match price {
        Some(FeedPrice::Amount { amount }) => amount
            .filter(|amount| !amount.is_empty())
            .unwrap_or_else(|| "0.00".to_string()),
        Some(FeedPrice::Text(text)) if !text.is_empty() => text,
        Some(FeedPrice::Number(number)) => number.to_string(),
        Some(FeedPrice::Text(_)) | None => "0.00".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(raw: &str) -> Vec<Product> {
        let feed: Vec<FeedProduct> = serde_json::from_str(raw).unwrap();
        convert_products(feed)
    }

    #[test]
    fn test_full_product_converts() {
        let products = from_json(
            r#"[{
                "id": "p1",
                "title": "Shirt",
                "descriptionHtml": "<p>Soft <b>cotton</b> shirt.</p>",
                "images": [
                    {"id": "i1", "url": "https://cdn.example.com/main.jpg"},
                    {"id": "i2", "url": "https://cdn.example.com/blue.jpg"}
                ],
                "variants": [{
                    "id": "v1",
                    "title": "Blue / M",
                    "price": {"amount": "29.99"},
                    "availableForSale": true,
                    "image": {"id": "i2"}
                }]
            }]"#,
        );

        assert_eq!(products.len(), 1);
        let product = &products[0];
        assert_eq!(product.title, "Shirt");
        assert_eq!(product.description, "Soft cotton shirt.");
        assert_eq!(product.image.url, "https://cdn.example.com/main.jpg");
        assert_eq!(product.variants[0].price, "29.99");
        assert_eq!(
            product.variants[0].image.as_ref().unwrap().url,
            "https://cdn.example.com/blue.jpg"
        );
    }

    #[test]
    fn test_product_without_id_is_dropped() {
        let products = from_json(r#"[{"title": "No id"}, {"id": "", "title": "Empty id"}]"#);
        assert!(products.is_empty());
    }

    #[test]
    fn test_missing_images_use_placeholder() {
        let products = from_json(r#"[{"id": "p1", "variants": [{"id": "v1"}]}]"#);
        assert_eq!(products[0].image.url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(
            products[0].variants[0].image.as_ref().unwrap().url,
            PLACEHOLDER_IMAGE_URL
        );
    }

    #[test]
    fn test_variant_image_falls_back_to_main_image() {
        let products = from_json(
            r#"[{
                "id": "p1",
                "images": [{"id": "i1", "url": "https://cdn.example.com/main.jpg"}],
                "variants": [{"id": "v1", "image": {"id": "i9"}}]
            }]"#,
        );
        assert_eq!(
            products[0].variants[0].image.as_ref().unwrap().url,
            "https://cdn.example.com/main.jpg"
        );
    }

    #[test]
    fn test_price_shapes_extracted() {
        let products = from_json(
            r#"[{
                "id": "p1",
                "variants": [
                    {"id": "v1", "price": {"amount": "29.99"}},
                    {"id": "v2", "price": "15.00"},
                    {"id": "v3", "price": 19.5},
                    {"id": "v4", "price": {"currency": "USD"}},
                    {"id": "v5"}
                ]
            }]"#,
        );

        let prices: Vec<&str> = products[0]
            .variants
            .iter()
            .map(|variant| variant.price.as_str())
            .collect();
        assert_eq!(prices, vec!["29.99", "15.00", "19.5", "0.00", "0.00"]);
    }

    #[test]
    fn test_availability_defaults_true() {
        let products = from_json(
            r#"[{
                "id": "p1",
                "variants": [
                    {"id": "v1"},
                    {"id": "v2", "availableForSale": false}
                ]
            }]"#,
        );
        assert!(products[0].variants[0].available);
        assert!(!products[0].variants[1].available);
    }

    #[test]
    fn test_product_without_variants_gets_default_variant() {
        let products = from_json(r#"[{"id": "p1", "title": "Poster"}]"#);
        let variants = &products[0].variants;
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].id, "default");
        assert_eq!(variants[0].title, "Default");
        assert_eq!(variants[0].price, "0.00");
        assert!(variants[0].available);
    }

    #[test]
    fn test_description_fallbacks() {
        let products = from_json(
            r#"[
                {"id": "p1", "description": "Plain text."},
                {"id": "p2", "descriptionHtml": "<p></p>"},
                {"id": "p3"}
            ]"#,
        );
        assert_eq!(products[0].description, "Plain text.");
        assert_eq!(products[1].description, "No description");
        assert_eq!(products[2].description, "No description");
    }
}
