//! The category breakdown pie chart.
//!
//! The chart is generated as JSON configuration for the ECharts library and
//! rendered with an inline initialisation script, so that it is drawn both on
//! the initial page load and whenever htmx swaps in new dashboard content.

use std::collections::BTreeMap;

use charming::{
    Chart,
    component::Legend,
    element::{JsFunction, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::transaction::Category;

/// The HTML element ID of the category breakdown chart.
pub(super) const CATEGORY_CHART_ID: &str = "category-chart";

/// Builds a pie chart with one slice per category.
pub(super) fn category_breakdown_chart(category_totals: &BTreeMap<Category, Decimal>) -> Chart {
    let data: Vec<(f64, &'static str)> = category_totals
        .iter()
        .map(|(category, total)| (total.to_f64().unwrap_or_default(), category.name()))
        .collect();

    Chart::new()
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().left("center").top("bottom"))
        .series(Pie::new().name("Amount").radius("65%").data(data))
}

/// Renders the chart container and the script that draws `chart` into it.
pub(super) fn chart_view(chart: &Chart) -> Markup {
    let script = format!(
        r#"(function() {{
            const chartDom = document.getElementById("{CATEGORY_CHART_ID}");
            // htmx swaps replace the container, leaving the old instance detached
            const previous = window.categoryChart;
            if (previous && !previous.isDisposed() && !document.body.contains(previous.getDom())) {{
                previous.dispose();
            }}
            const chart = echarts.getInstanceByDom(chartDom) || echarts.init(chartDom);
            const option = {};
            chart.setOption(option, true);

            window.categoryChart = chart;
            if (!window.categoryChartResizeListener) {{
                window.categoryChartResizeListener = () => window.categoryChart.resize();
                window.addEventListener('resize', window.categoryChartResizeListener);
            }}
        }})();"#,
        chart
    );

    html! {
        div
            id=(CATEGORY_CHART_ID)
            class="min-h-[380px] w-full rounded"
        {}

        script { (PreEscaped(script)) }
    }
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return currencyFormatter.format(number);",
    )
}
