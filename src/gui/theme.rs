use arcus_core::RingColor;
use gdk4 as gdk;
use gtk4 as gtk;

pub fn track_color() -> RingColor {
    RingColor::new(225, 225, 225)
}

pub fn hole_color() -> RingColor {
    RingColor::new(255, 255, 255)
}

pub fn outline_color() -> RingColor {
    RingColor::rgba(0, 0, 0, 60)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.arcus-progress {
    background: none;
    background-color: transparent;
}
.arcus-caption {
    font-variant-numeric: tabular-nums;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
