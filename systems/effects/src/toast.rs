//! Transient notifications with fade-in and fade-out.

use risk_rush_core::{format_amount, PolicyKind, RiskKind};

/// Alpha change per second while fading.
pub const FADE_RATE: f32 = 5.0 * 255.0;

/// Display time of a booster pickup toast.
pub const ACTIVATION_SECONDS: f32 = 2.0;
/// Display time of a covered-risk toast.
pub const SAVED_SECONDS: f32 = 2.5;
/// Display time of an educational tip.
pub const TIP_SECONDS: f32 = 3.5;
/// Display time of a repeated-loss toast.
pub const LOSS_SECONDS: f32 = 2.0;

/// Message shown for every unprotected hit after the first of its category.
pub const LOSS_TEXT: &str = "Loss! Budget -1";

/// Text announcing a collected booster.
#[must_use]
pub fn activation_text(policy: PolicyKind) -> String {
    format!("{} ACTIVATED!", policy.label())
}

/// Text announcing a risk absorbed by a policy.
#[must_use]
pub fn saved_text(policy: PolicyKind, cost: u64) -> String {
    format!("{} saved you! Saved: {} RUB", policy.label(), format_amount(cost))
}

/// Educational tip shown on the first unprotected hit of a category.
#[must_use]
pub fn tip_text(risk: RiskKind) -> String {
    let lesson = match risk {
        RiskKind::Tree => "PROPERTY cover pays for a fallen tree!",
        RiskKind::Phone => "PROPERTY cover pays for a broken phone!",
        RiskKind::Accident => "KASKO pays for road accidents!",
        RiskKind::Bill => "DMS pays unexpected medical bills!",
    };
    format!("{lesson} Saves: {} RUB", format_amount(risk.cost()))
}

#[derive(Clone, Debug, PartialEq)]
struct Toast {
    message: String,
    remaining: f32,
    alpha: f32,
}

/// Read-only view of the visible toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToastView<'a> {
    /// Message text; lines are separated by `"! "`.
    pub message: &'a str,
    /// Opacity from 0 to 255.
    pub alpha: u8,
}

/// Single-slot notification feed; a new toast replaces the current one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastFeed {
    current: Option<Toast>,
}

impl ToastFeed {
    /// Shows `message` for `seconds`, fading in from transparent.
    pub fn show(&mut self, message: String, seconds: f32) {
        let alpha = self.current.as_ref().map_or(0.0, |toast| toast.alpha);
        self.current = Some(Toast {
            message,
            remaining: seconds.max(0.0),
            alpha,
        });
    }

    /// Advances the display timer and fades the alpha.
    pub fn update(&mut self, dt: f32) {
        let Some(toast) = self.current.as_mut() else {
            return;
        };
        if toast.remaining > 0.0 {
            toast.remaining -= dt;
            toast.alpha = (toast.alpha + FADE_RATE * dt).min(255.0);
            return;
        }
        toast.alpha -= FADE_RATE * dt;
        if toast.alpha <= 0.0 {
            self.current = None;
        }
    }

    /// Visible toast, if any.
    #[must_use]
    pub fn current(&self) -> Option<ToastView<'_>> {
        self.current.as_ref().map(|toast| ToastView {
            message: &toast.message,
            alpha: toast.alpha.clamp(0.0, 255.0) as u8,
        })
    }
}
