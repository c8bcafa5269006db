use contract_core::{SummarySection, SummaryView};
use gpui::{
    App, FontWeight, IntoElement, ParentElement, RenderOnce, SharedString, Styled, Window, div, px,
};
use gpui_component::{ActiveTheme, h_flex, v_flex};

/// Label of the button that fills the summary.
pub const SHOW_SUMMARY_LABEL: &str = "Ver resumen";

/// Read-only rendering of the last summary the wizard produced.
#[derive(IntoElement)]
pub struct SummaryPanel {
    summary: SummaryView,
}

impl SummaryPanel {
    pub fn new(summary: SummaryView) -> Self {
        Self { summary }
    }
}

impl RenderOnce for SummaryPanel {
    fn render(
        self,
        _: &mut Window,
        cx: &mut App,
    ) -> impl IntoElement {
        let theme = cx.theme();

        let body = if self.summary.is_empty() {
            vec![
                div()
                    .text_color(theme.muted_foreground)
                    .child(format!("El resumen aparecerá aquí al pulsar «{SHOW_SUMMARY_LABEL}».")),
            ]
        } else {
            self.summary
                .sections()
                .iter()
                .map(|section| render_section(section, cx))
                .collect()
        };

        v_flex()
            .gap_3()
            .p_4()
            .rounded_md()
            .border_1()
            .border_color(cx.theme().border)
            .child(div().text_lg().font_weight(FontWeight::BOLD).child("Resumen"))
            .children(body)
    }
}

fn render_section(
    section: &SummarySection,
    cx: &App,
) -> gpui::Div {
    let rows = section.entries().iter().map(|entry| {
        h_flex()
            .gap_2()
            .items_start()
            .child(
                div()
                    .min_w(px(180.))
                    .font_weight(FontWeight::SEMIBOLD)
                    .child(SharedString::from(format!("{}:", entry.label))),
            )
            .child(div().flex_1().child(entry.value.clone()))
    });

    v_flex()
        .gap_1()
        .child(
            div()
                .font_weight(FontWeight::BOLD)
                .text_color(cx.theme().primary)
                .child(section.title),
        )
        .children(rows)
}
