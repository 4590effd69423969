//! HTTP handlers for the plot page.

use axum::response::Html;

/// Serve the plot page.
pub async fn index() -> Html<&'static str> {
    Html(PLOT_PAGE_HTML)
}

/// Static page that opens a WebSocket to `/data` and swaps in each received
/// chart.
const PLOT_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>luxstream - live sensor plot</title>
    <script type="text/javascript">
    var sock = null;
    var plot = "";

    function update() {
        var p = document.getElementById("my-plot");
        p.innerHTML = plot;
    };

    window.onload = function() {
        var protocol = window.location.protocol === "https:" ? "wss:" : "ws:";
        sock = new WebSocket(protocol + "//" + location.host + "/data");

        sock.onmessage = function(event) {
            var data = JSON.parse(event.data);
            plot = data.plot;
            update();
        };
    };
    </script>

    <style>
    .my-plot-style {
        width: 400px;
        height: 200px;
        font-size: 14px;
        line-height: 1.2em;
    }
    </style>
</head>

<body>
    <div id="header">
        <h2>Light sensor</h2>
    </div>

    <div id="content">
        <div id="my-plot" class="my-plot-style"></div>
    </div>
</body>
</html>
"#;
