use crate::config::{self, Config, RingConfig};
use crate::events::AppEvent;
use crate::gui::progress::CircleProgress;
use crate::gui::theme;
use arcus_core::RingColor;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;

pub struct AppModel {
    pub progress: CircleProgress,
    pub caption: String,
}

#[derive(Debug)]
pub enum AppMsg {
    SetValue(i32),
    SetMaximum(i32),
    SetInnerRadius(f64),
    SetOuterRadius(f64),
    SetColor(RingColor),
    ConfigReload,
    ProgressChanged,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::SetValue(v) => AppMsg::SetValue(v),
            AppEvent::SetMaximum(m) => AppMsg::SetMaximum(m),
            AppEvent::SetInnerRadius(r) => AppMsg::SetInnerRadius(r),
            AppEvent::SetOuterRadius(r) => AppMsg::SetOuterRadius(r),
            AppEvent::SetColor(c) => AppMsg::SetColor(c),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

pub fn caption(value: i32, maximum: i32) -> String {
    if maximum == 0 {
        return "Working".to_string();
    }
    let percent = (value.min(maximum) as f64 * 100.0 / maximum as f64).round();
    format!("{} / {} ({}%)", value, maximum, percent)
}

fn apply_ring(progress: &CircleProgress, ring: &RingConfig) {
    progress.set_color(ring.color);
    progress.set_inner_radius(ring.inner_radius);
    progress.set_outer_radius(ring.outer_radius);
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Arcus"),
            set_default_size: (240, 280),

            #[name = "content"]
            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 8,
                set_margin_top: 12,
                set_margin_bottom: 12,
                set_margin_start: 12,
                set_margin_end: 12,

                #[name = "caption"]
                gtk::Label {
                    add_css_class: "arcus-caption",
                    #[watch]
                    set_label: &model.caption,
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let progress = CircleProgress::with_timing(
            config.animation.value_transition(),
            config.animation.spin_period(),
        );
        apply_ring(&progress, &config.ring);
        progress.set_maximum(config.progress.maximum);
        progress.set_value(config.progress.value);

        {
            let sender = sender.clone();
            progress.connect_value_changed(move |_| sender.input(AppMsg::ProgressChanged));
        }
        {
            let sender = sender.clone();
            progress.connect_maximum_changed(move |_| sender.input(AppMsg::ProgressChanged));
        }

        let model = AppModel {
            caption: caption(progress.value(), progress.maximum()),
            progress,
        };

        let widgets = view_output!();
        widgets.content.prepend(model.progress.widget());

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::SetValue(v) => self.progress.set_value(v),
            AppMsg::SetMaximum(m) => self.progress.set_maximum(m),
            AppMsg::SetInnerRadius(r) => self.progress.set_inner_radius(r),
            AppMsg::SetOuterRadius(r) => self.progress.set_outer_radius(r),
            AppMsg::SetColor(c) => self.progress.set_color(c),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    apply_ring(&self.progress, &new_config.ring);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::ProgressChanged => {
                self.caption = caption(self.progress.value(), self.progress.maximum());
            }
        }
    }
}
