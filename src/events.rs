use arcus_core::RingColor;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    SetValue(i32),
    SetMaximum(i32),
    SetInnerRadius(f64),
    SetOuterRadius(f64),
    SetColor(RingColor),
    ConfigReload,
}
