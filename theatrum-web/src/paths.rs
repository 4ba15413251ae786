//! URLs for posters, hero media and the router, honouring the deployment base.
//!
//! `PUBLIC_URL` is read at compile time (for example `/theatrum` when the
//! site is served from a subdirectory). Without it everything is anchored at
//! the root.
use theatrum_core::SlideMedia;

const PUBLIC_URL: Option<&str> = option_env!("PUBLIC_URL");

/// Site-relative asset path with the deployment base applied.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, PUBLIC_URL.unwrap_or(""))
}

/// Poster or media reference as an `src` value. Absolute URLs (CDN posters,
/// video embeds) pass through untouched.
#[must_use]
pub fn media_src(reference: &str) -> String {
    if is_absolute(reference) {
        reference.to_string()
    } else {
        asset_path(reference)
    }
}

/// `src` for a hero slide's media element.
#[must_use]
pub fn slide_src(media: &SlideMedia) -> String {
    match media {
        SlideMedia::Image(src) | SlideMedia::Video(src) => media_src(src),
    }
}

/// Router basename, or `None` when the site lives at the root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(PUBLIC_URL.unwrap_or(""))
}

fn is_absolute(reference: &str) -> bool {
    reference.starts_with("https://")
        || reference.starts_with("http://")
        || reference.starts_with("//")
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');
    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim().trim_end_matches('/');
    (!base.is_empty()).then(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_are_root_anchored_without_a_base() {
        assert_eq!(asset_path("assets/opp-poster.jpg"), "/assets/opp-poster.jpg");
        assert_eq!(asset_path("/assets/opp-poster.jpg"), "/assets/opp-poster.jpg");
    }

    #[test]
    fn assets_take_the_public_base() {
        assert_eq!(
            asset_path_with_base("assets/dune2-poster.jpg", "/theatrum/"),
            "/theatrum/assets/dune2-poster.jpg"
        );
        assert_eq!(
            asset_path_with_base("/assets/dune2-poster.jpg", "/theatrum"),
            "/theatrum/assets/dune2-poster.jpg"
        );
    }

    #[test]
    fn remote_media_is_left_alone() {
        let poster = "https://images.pexels.com/photos/7991579/pexels-photo-7991579.jpeg";
        assert_eq!(media_src(poster), poster);
        let trailer = SlideMedia::Video("https://www.youtube.com/embed/Way9Dexny3w".into());
        assert_eq!(slide_src(&trailer), "https://www.youtube.com/embed/Way9Dexny3w");
        assert_eq!(
            slide_src(&SlideMedia::Image("assets/sonic2-poster.jpg".into())),
            "/assets/sonic2-poster.jpg"
        );
    }

    #[test]
    fn router_base_is_trimmed_or_absent() {
        assert_eq!(router_base(), None);
        assert_eq!(router_base_with_base("  "), None);
        assert_eq!(
            router_base_with_base("/theatrum/"),
            Some(String::from("/theatrum"))
        );
    }
}
