//! Plain HTML pages for the search form and the review summary.

use pz_core::{pretty_date, Business, ReviewSummary};

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

fn form() -> &'static str {
    r#"<form action="/find" method="post">
  <label>Pizzeria <input type="text" name="name"></label>
  <label>Reviews <input type="number" name="count" min="0" max="10" value="5"></label>
  <button type="submit">Find</button>
</form>"#
}

pub fn search_form() -> String {
    page("Find a pizzeria", &format!("<h1>Find a pizzeria</h1>\n{}", form()))
}

pub fn no_match(term: &str) -> String {
    page(
        "No match",
        &format!(
            "<h1>No pizzeria found for &ldquo;{}&rdquo;</h1>\n{}",
            escape(term),
            form()
        ),
    )
}

pub fn failure() -> String {
    page(
        "Something went wrong",
        &format!("<h1>Something went wrong, try again later.</h1>\n{}", form()),
    )
}

pub fn results(term: &str, business: &Business, summary: &ReviewSummary) -> String {
    let average = summary
        .average_rating
        .map(|a| format!("{:.1}", a))
        .unwrap_or_else(|| "n/a".to_string());

    let reviews = summary
        .reviews
        .iter()
        .map(|review| {
            format!(
                "  <li class=\"review\">\n    <span class=\"date\">{}</span>\n    <span class=\"rating\">{}</span>\n    <span class=\"author\">{}</span>\n    <p>{}</p>\n  </li>",
                review.date.map(pretty_date).unwrap_or_else(|| "unknown date".to_string()),
                review
                    .rating
                    .map(|r| format!("{:.1}", r))
                    .unwrap_or_else(|| "unrated".to_string()),
                escape(review.author.as_deref().unwrap_or("anonymous")),
                escape(&review.content)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        "<h1><a href=\"{}\">{}</a></h1>\n<p class=\"search\">You searched for &ldquo;{}&rdquo;</p>\n<p class=\"average\">Average rating: {}</p>\n<ol class=\"reviews\">\n{}\n</ol>\n{}",
        escape(&business.url),
        escape(&business.name),
        escape(term),
        average,
        reviews,
        form()
    );
    page(&business.name, &body)
}
