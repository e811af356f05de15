pub const GLOBAL_CSS: &str = r#"
:root {
  --bg: hsl(220, 13%, 6%);
  --card: hsl(220, 13%, 10%);
  --card-glass: hsla(220, 13%, 10%, 0.95);
  --chart-bg: hsl(220, 13%, 8%);
  --border: hsl(220, 13%, 18%);
  --text: hsl(210, 40%, 96%);
  --text-muted: hsl(210, 20%, 65%);
  --accent: hsl(210, 100%, 60%);
  --accent-fg: hsl(220, 13%, 8%);
  --secondary: hsl(220, 13%, 18%);
  --secondary-hover: hsl(220, 13%, 24%);
  --interval: hsl(220, 13%, 14%);
  --interval-hover: hsl(220, 13%, 20%);
  --interval-active: hsl(210, 100%, 60%);
  --interval-active-fg: hsl(220, 13%, 8%);
  --ring: hsl(210, 100%, 60%);
  --shadow-soft: 0 10px 30px rgba(0, 0, 0, 0.4);
  --radius: 6px;
  --space-1: 4px;
  --space-2: 8px;
  --space-3: 12px;
  --space-4: 16px;
  --font-body: "Inter", "SF Pro Text", system-ui, -apple-system, sans-serif;
  --font-size-xs: 12px;
  --font-size-sm: 14px;
  --transition: 140ms ease-out;
}

* { box-sizing: border-box; }
html, body {
  padding: 0;
  margin: 0;
  background: var(--bg);
  color: var(--text);
  font-family: var(--font-body);
  font-size: var(--font-size-sm);
  line-height: 1.4;
  min-height: 100%;
}

.btn {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  gap: var(--space-2);
  border: 1px solid transparent;
  border-radius: var(--radius);
  font-family: var(--font-body);
  font-weight: 500;
  cursor: pointer;
  transition: background var(--transition), color var(--transition), box-shadow var(--transition);
}
.btn:focus-visible { outline: none; box-shadow: 0 0 0 2px var(--ring); }
.btn:disabled { pointer-events: none; opacity: 0.5; }
.btn-default { background: var(--accent); color: var(--accent-fg); }
.btn-secondary { background: var(--secondary); color: var(--text); }
.btn-secondary:hover { background: var(--secondary-hover); }
.btn-ghost { background: transparent; color: var(--text-muted); }
.btn-ghost:hover { background: var(--secondary); color: var(--text); }
.btn-size-default { height: 36px; padding: var(--space-2) var(--space-4); font-size: var(--font-size-sm); }
.btn-size-sm { height: 32px; padding: 0 var(--space-3); font-size: var(--font-size-xs); }
.btn-size-lg { height: 40px; padding: 0 32px; font-size: var(--font-size-sm); }

.interval-btn { min-width: 3rem; }
.interval-default { background: var(--interval); color: var(--text); }
.interval-default:hover { background: var(--interval-hover); }
.interval-active { background: var(--interval-active); color: var(--interval-active-fg); box-shadow: 0 1px 2px rgba(0, 0, 0, 0.3); }
.interval-loading { background: var(--interval); color: var(--text-muted); cursor: not-allowed; animation: pulse-subtle 1.4s ease-in-out infinite; }
.interval-loading:disabled { opacity: 1; }

.trading-chart { height: 100vh; width: 100%; display: flex; flex-direction: column; background: var(--bg); }
.interval-bar { display: flex; align-items: center; justify-content: center; gap: var(--space-2); padding: var(--space-4); background: var(--card); border-bottom: 1px solid var(--border); }
.chart-container { flex: 1 1 auto; width: 100%; min-height: 0; background: var(--chart-bg); }

.install-fab { position: fixed; top: var(--space-4); left: var(--space-4); z-index: 50; }
.install-fab .btn { box-shadow: var(--shadow-soft); backdrop-filter: blur(4px); }
.install-banner { position: fixed; top: var(--space-4); left: var(--space-4); right: var(--space-4); z-index: 50; display: flex; align-items: flex-start; gap: var(--space-3); padding: var(--space-4); background: var(--card-glass); backdrop-filter: blur(4px); border: 1px solid var(--border); border-radius: 8px; box-shadow: var(--shadow-soft); }
.install-banner-body { flex: 1 1 auto; }
.install-banner-title { margin: 0 0 var(--space-1); font-size: var(--font-size-sm); font-weight: 500; }
.install-banner-text { margin: 0; font-size: var(--font-size-xs); color: var(--text-muted); }
.install-banner-icon { display: inline-flex; vertical-align: middle; width: 16px; height: 16px; margin: 0 var(--space-1); }

@keyframes pulse-subtle { 0%, 100% { opacity: 1; } 50% { opacity: 0.6; } }
"#;
