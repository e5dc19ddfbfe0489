use crate::di::Inject;
use crate::modules::user::{User, UserService};
use axum::response::Html;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

pub(super) async fn index(Inject(service): Inject<UserService>) -> Html<String> {
    Html(render_index(&service.list().await))
}

fn render_index(users: &[User]) -> String {
    let rows: String = users
        .iter()
        .map(|user| {
            format!(
                "<tr data-id=\"{id}\"><td>{id}</td><td>{}</td><td>{}</td>\
                 <td><button data-delete=\"{id}\">Delete</button></td></tr>\n",
                escape(user.name.as_deref().unwrap_or("")),
                escape(user.email.as_deref().unwrap_or("")),
                id = user.id,
            )
        })
        .collect();

    INDEX_TEMPLATE
        .replace("{{count}}", &users.len().to_string())
        .replace("{{rows}}", &rows)
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
