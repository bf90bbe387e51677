//! The planned versus actual chart on the budget page.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::Bar,
};
use maud::{Markup, PreEscaped, html};

use crate::{budget_item::BudgetSummary, html::HeadElement};

/// The HTML element ID of the chart container.
pub(super) const CHART_ID: &str = "planned-vs-actual-chart";

/// A bar chart comparing the planned and actual amounts of each category.
pub(super) fn planned_vs_actual_chart(summary: &BudgetSummary) -> Chart {
    let labels: Vec<String> = summary
        .categories
        .iter()
        .map(|category| category.category.name.to_string())
        .collect();
    let planned: Vec<f64> = summary
        .categories
        .iter()
        .map(|category| category.planned.to_f64_lossy())
        .collect();
    let actual: Vec<f64> = summary
        .categories
        .iter()
        .map(|category| category.actual.to_f64_lossy())
        .collect();

    Chart::new()
        .title(Title::new().text("Planned vs Actual").subtext("By category"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .legend(Legend::new().top("1%").right("4%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(70)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Planned").data(planned))
        .series(Bar::new().name("Actual").data(actual))
}

fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// The container the chart is drawn into.
pub(super) fn chart_view() -> Markup {
    html!(
        div id=(CHART_ID) class="min-h-[380px] w-full rounded dark:bg-gray-100" {}
    )
}

/// Scripts that load ECharts and draw `chart` once the page has loaded.
pub(super) fn chart_head_elements(chart: &Chart) -> [HeadElement; 2] {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chart = echarts.init(document.getElementById("{CHART_ID}"));
            chart.setOption({});
            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            }};
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#,
        chart
    );

    [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        HeadElement::ScriptSource(PreEscaped(script)),
    ]
}
