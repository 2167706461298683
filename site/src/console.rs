//! Browser console for the directory API

use axum::response::Html;

pub async fn console() -> Html<&'static str> {
    Html(CONSOLE_HTML)
}

const CONSOLE_HTML: &str = r##"<!DOCTYPE html>
<html>
<head>
    <title>AI Tools Directory</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
        * { box-sizing: border-box; }
        body { font-family: system-ui, sans-serif; background: #f8fafc; color: #0f172a; padding: 20px; margin: 0; }
        h1 { color: #0ea5e9; margin-bottom: 4px; }
        .sub { color: #64748b; margin-top: 0; }
        .bar { display: flex; gap: 8px; margin: 16px 0; flex-wrap: wrap; }
        input, select, textarea { border: 1px solid #cbd5e1; border-radius: 6px; padding: 8px 10px; font: inherit; }
        input { flex: 1; min-width: 200px; }
        button { background: #0ea5e9; color: white; border: none; border-radius: 6px; padding: 8px 16px; cursor: pointer; font: inherit; }
        button:disabled { opacity: 0.5; cursor: not-allowed; }
        .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 12px; }
        .card { background: white; border: 1px solid #e2e8f0; border-radius: 8px; padding: 14px; cursor: pointer; }
        .card:hover { border-color: #0ea5e9; }
        .card h3 { margin: 0 0 6px 0; font-size: 1em; }
        .card p { margin: 0; color: #475569; font-size: 0.9em; }
        .tag { display: inline-block; font-size: 0.75em; color: #8b5cf6; margin-top: 8px; }
        .pager { display: flex; gap: 8px; align-items: center; margin: 16px 0; color: #64748b; }
        #tool { display: none; background: white; border: 1px solid #e2e8f0; border-radius: 8px; padding: 16px; margin-top: 16px; }
        #tool textarea { width: 100%; min-height: 100px; }
        pre { background: #0f172a; color: #e2e8f0; padding: 12px; border-radius: 6px; white-space: pre-wrap; }
    </style>
</head>
<body>
    <h1>AI Tools Directory</h1>
    <p class="sub">Search and try AI tools for everyday tasks</p>

    <div class="bar">
        <input id="q" placeholder="Search tools...">
        <select id="category"><option value="all">All categories</option></select>
        <button onclick="load(1)">Search</button>
    </div>

    <div class="grid" id="results"></div>
    <div class="pager">
        <button id="prev" onclick="load(page - 1)">Previous</button>
        <span id="summary"></span>
        <button id="next" onclick="load(page + 1)">Next</button>
    </div>

    <div id="tool">
        <h2 id="tool-name"></h2>
        <p id="tool-desc"></p>
        <textarea id="tool-input"></textarea>
        <div class="bar"><button id="run" onclick="run()">Process</button></div>
        <pre id="tool-output"></pre>
    </div>

<script>
let page = 1;
let current = null;

async function init() {
    const cats = await (await fetch('/api/categories')).json();
    const sel = document.getElementById('category');
    for (const c of cats) {
        const opt = document.createElement('option');
        opt.value = c.slug;
        opt.textContent = c.name + ' (' + c.tool_count + ')';
        sel.appendChild(opt);
    }
    load(1);
}

async function load(p) {
    page = Math.max(1, p);
    const q = encodeURIComponent(document.getElementById('q').value);
    const category = document.getElementById('category').value;
    const res = await (await fetch('/api/tools?q=' + q + '&category=' + category + '&page=' + page)).json();
    const grid = document.getElementById('results');
    grid.innerHTML = '';
    for (const t of res.items) {
        const card = document.createElement('div');
        card.className = 'card';
        card.onclick = () => open(t.id);
        card.innerHTML = '<h3></h3><p></p><span class="tag"></span>';
        card.querySelector('h3').textContent = (t.icon || '') + ' ' + t.name;
        card.querySelector('p').textContent = t.description;
        card.querySelector('.tag').textContent = t.category;
        grid.appendChild(card);
    }
    document.getElementById('summary').textContent =
        res.total + ' tools, page ' + res.page + ' of ' + Math.max(1, res.total_pages);
    document.getElementById('prev').disabled = !res.has_previous;
    document.getElementById('next').disabled = !res.has_next;
}

async function open(id) {
    const res = await fetch('/api/tools/' + id);
    if (!res.ok) return;
    current = await res.json();
    document.getElementById('tool').style.display = 'block';
    document.getElementById('tool-name').textContent = current.name;
    document.getElementById('tool-desc').textContent = current.description;
    document.getElementById('tool-input').placeholder = current.input_placeholder || 'Enter your input...';
    document.getElementById('tool-output').textContent = '';
}

async function run() {
    if (!current) return;
    const btn = document.getElementById('run');
    btn.disabled = true;
    btn.textContent = 'Processing...';
    const res = await fetch('/api/tools/' + current.id + '/process', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ input: document.getElementById('tool-input').value }),
    });
    const body = await res.json();
    document.getElementById('tool-output').textContent = res.ok ? body.output : body.error;
    btn.disabled = false;
    btn.textContent = 'Process';
}

init();
</script>
</body>
</html>
"##;
