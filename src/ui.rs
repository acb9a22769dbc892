use crate::models::{HabitBoard, HabitView};

const CATEGORIES: [&str; 7] = [
    "Health",
    "Mindfulness",
    "Learning",
    "Fitness",
    "Productivity",
    "Reflection",
    "Other",
];

pub fn render_index(board: &HabitBoard) -> String {
    let total = board.habits.len();
    let percent = if total == 0 {
        0
    } else {
        board.completed_count * 100 / total
    };
    let habits: String = board
        .habits
        .iter()
        .map(|habit| render_habit(habit, board.streaks_enabled))
        .collect();
    let categories: String = CATEGORIES
        .iter()
        .map(|category| {
            let selected = if *category == "Other" { " selected" } else { "" };
            format!(r#"<option value="{category}"{selected}>{category}</option>"#)
        })
        .collect();

    INDEX_HTML
        .replace("{{DATE}}", &board.date.to_string())
        .replace("{{DONE}}", &board.completed_count.to_string())
        .replace("{{TOTAL}}", &total.to_string())
        .replace("{{PERCENT}}", &percent.to_string())
        .replace("{{STREAK}}", &board.total_streak.to_string())
        .replace("{{CATEGORIES}}", &categories)
        .replace("{{HABITS}}", &habits)
        .replace("{{NOTICE}}", &escape_html(board.notice.as_deref().unwrap_or("")))
}

fn render_habit(habit: &HabitView, streaks_enabled: bool) -> String {
    let state = if habit.completed { "done" } else { "open" };
    let mark = if habit.completed { "✔" } else { "○" };
    let badge = match habit.streak {
        Some(streak) if streaks_enabled && streak > 0 => {
            format!(r#"<span class="streak">🔥 {streak}</span>"#)
        }
        _ => String::new(),
    };

    format!(
        r#"<li class="habit {state}">
        <form method="post" action="/habits/{id}/toggle"><button class="check" type="submit" title="Toggle">{mark}</button></form>
        <div class="info">
          <span class="name">{icon} {name}</span>
          <span class="tags"><span>{category}</span><span>{frequency}</span></span>
        </div>
        {badge}
        <form method="post" action="/habits/{id}/delete"><button class="remove" type="submit" title="Delete">✕</button></form>
      </li>"#,
        id = habit.id,
        icon = escape_html(&habit.icon),
        name = escape_html(&habit.name),
        category = escape_html(&habit.category),
        frequency = escape_html(&habit.frequency),
    )
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Your Habits</title>
  <style>
    :root {
      --paper: #f4f7f5;
      --ink: #1d2b2a;
      --muted: #6b7c7a;
      --accent: #32746d;
      --soft: #9ec5ab;
      --warm: #e98a3c;
      --card: #ffffff;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--paper), #e3efe8);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      padding: 32px 16px;
    }

    main {
      max-width: 760px;
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    h1 { margin: 0 0 4px; font-size: 2rem; }
    .subtitle { margin: 0; color: var(--muted); }

    .summary {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 12px;
    }

    .card {
      background: var(--card);
      border-radius: 14px;
      padding: 16px;
      box-shadow: 0 8px 24px rgba(29, 43, 42, 0.08);
    }

    .card .label { font-size: 0.8rem; text-transform: uppercase; color: var(--muted); }
    .card .value { display: block; font-size: 1.6rem; font-weight: 700; color: var(--accent); margin-top: 6px; }
    .bar { height: 6px; background: #e1ebe6; border-radius: 3px; margin-top: 10px; }
    .bar span { display: block; height: 100%; background: var(--accent); border-radius: 3px; }

    ul { list-style: none; margin: 0; padding: 0; display: grid; gap: 10px; }

    .habit {
      display: flex;
      align-items: center;
      gap: 14px;
      background: var(--card);
      border-radius: 14px;
      padding: 14px 16px;
    }

    .habit form { margin: 0; }
    .habit .info { flex: 1; display: grid; gap: 6px; }
    .habit.done .name { text-decoration: line-through; color: var(--muted); }
    .tags span { background: #eef3f1; border-radius: 6px; padding: 2px 8px; font-size: 0.75rem; margin-right: 6px; }
    .streak { background: #fdf0e4; color: var(--warm); border-radius: 999px; padding: 4px 10px; font-weight: 600; }

    button { cursor: pointer; border: none; background: none; font-size: 1.2rem; }
    .check { color: var(--muted); }
    .habit.done .check { color: var(--accent); }
    .remove { color: var(--muted); font-size: 0.9rem; }

    .add { display: flex; flex-wrap: wrap; gap: 8px; }
    .add input, .add select { padding: 10px; border-radius: 10px; border: 1px solid #cfdcd6; font-size: 1rem; }
    .add input { flex: 1; min-width: 180px; }
    .add button { background: var(--accent); color: white; border-radius: 10px; padding: 10px 16px; font-size: 1rem; }

    .notice { min-height: 1.2em; color: #b3402e; }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>Your Habits</h1>
      <p class="subtitle">Build consistency, one day at a time. Today is {{DATE}}.</p>
    </header>

    <section class="summary">
      <div class="card">
        <span class="label">Today's progress</span>
        <span class="value">{{DONE}}/{{TOTAL}}</span>
        <div class="bar"><span style="width: {{PERCENT}}%"></span></div>
      </div>
      <div class="card">
        <span class="label">Active habits</span>
        <span class="value">{{TOTAL}}</span>
      </div>
      <div class="card">
        <span class="label">Total streak days</span>
        <span class="value">{{STREAK}}</span>
      </div>
    </section>

    <form class="add card" id="add-form" method="post" action="/habits">
      <input name="name" placeholder="Add a custom habit..." required />
      <select name="category">{{CATEGORIES}}</select>
      <button type="submit">Add habit</button>
    </form>

    <div class="notice" id="notice">{{NOTICE}}</div>

    <ul>
      {{HABITS}}
    </ul>
  </main>

  <script>
    const notice = document.getElementById('notice');

    const showNotice = (message) => {
      notice.textContent = message;
      setTimeout(() => { notice.textContent = ''; }, 3000);
    };

    if (notice.textContent) {
      showNotice(notice.textContent);
    }

    document.querySelectorAll('form').forEach((form) => {
      form.addEventListener('submit', async (event) => {
        event.preventDefault();
        const buttons = form.querySelectorAll('button');
        buttons.forEach((button) => { button.disabled = true; });
        try {
          const res = await fetch(form.action, {
            method: 'POST',
            body: new URLSearchParams(new FormData(form)),
            redirect: 'follow'
          });
          if (!res.ok) {
            showNotice(await res.text() || 'Request failed');
            return;
          }
          window.location.reload();
        } catch (err) {
          showNotice(err.message);
        } finally {
          buttons.forEach((button) => { button.disabled = false; });
        }
      });
    });
  </script>
</body>
</html>
"#;
