//! Server-rendered HTML for the listing page.

use chrono::{DateTime, Utc};
use hibiki_core::{AudioFile, Notice, ShortUrl};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; color: #222; }
h1 { font-size: 1.6rem; }
h2 { font-size: 1.2rem; border-bottom: 1px solid #ddd; padding-bottom: .3rem; margin-top: 2rem; }
.notice { padding: .6rem .8rem; border-radius: 4px; margin: .4rem 0; }
.notice.success { background: #e7f6e7; color: #205c20; }
.notice.error { background: #fbe9e9; color: #8a1f1f; }
ul.items { list-style: none; padding: 0; }
ul.items li { border: 1px solid #eee; border-radius: 4px; padding: .6rem .8rem; margin: .5rem 0; }
.meta { color: #777; font-size: .85rem; }
.empty { color: #999; }
form.inline { display: inline; }
audio { width: 100%; margin: .4rem 0; }
"#;

/// Everything the listing page shows.
pub struct IndexPage<'a> {
    pub notices: &'a [Notice],
    pub audio_files: &'a [AudioFile],
    pub short_urls: &'a [ShortUrl],
    /// Origin used to print absolute short links, e.g. `http://localhost:5000`.
    pub base_url: Option<&'a str>,
}

impl IndexPage<'_> {
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(4096);

        html.push_str("<!DOCTYPE html>\n<html lang=\"ja\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        html.push_str("<title>Hibiki</title>\n");
        html.push_str(&format!("<style>{}</style>\n", STYLE));
        html.push_str("</head>\n<body>\n<h1>Hibiki</h1>\n");

        self.render_notices(&mut html);
        self.render_audio_section(&mut html);
        self.render_url_section(&mut html);

        html.push_str("</body>\n</html>\n");
        html
    }

    fn render_notices(&self, html: &mut String) {
        for notice in self.notices {
            let class = if notice.is_error() { "error" } else { "success" };
            html.push_str(&format!(
                "<div class=\"notice {}\" role=\"status\">{}</div>\n",
                class,
                escape_html(&notice.message)
            ));
        }
    }

    fn render_audio_section(&self, html: &mut String) {
        html.push_str("<section id=\"audio\">\n<h2>音声ファイル</h2>\n");
        html.push_str(
            "<form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\n\
             <input type=\"file\" name=\"file\" accept=\".mp3,audio/mpeg\" required>\n\
             <button type=\"submit\">アップロード</button>\n\
             </form>\n",
        );

        if self.audio_files.is_empty() {
            html.push_str("<p class=\"empty\">ファイルはまだありません</p>\n");
        } else {
            html.push_str("<ul class=\"items\">\n");
            for file in self.audio_files {
                html.push_str(&format!(
                    "<li>\n<strong>{name}</strong> <span class=\"meta\">{date}</span>\n\
                     <audio controls preload=\"none\" src=\"{play}\"></audio>\n\
                     <a href=\"{download}\">ダウンロード</a>\n\
                     <form class=\"inline\" action=\"{delete}\" method=\"post\">\
                     <button type=\"submit\">削除</button></form>\n</li>\n",
                    name = escape_html(&file.display_name),
                    date = format_date(&file.upload_date),
                    play = file.play_path(),
                    download = file.download_path(),
                    delete = file.delete_path(),
                ));
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</section>\n");
    }

    fn render_url_section(&self, html: &mut String) {
        html.push_str("<section id=\"urls\">\n<h2>URL短縮</h2>\n");
        html.push_str(
            "<form action=\"/shorten\" method=\"post\">\n\
             <input type=\"text\" name=\"url\" placeholder=\"https://example.com\" size=\"50\">\n\
             <button type=\"submit\">短縮</button>\n\
             </form>\n",
        );

        if self.short_urls.is_empty() {
            html.push_str("<p class=\"empty\">短縮URLはまだありません</p>\n");
        } else {
            html.push_str("<ul class=\"items\">\n");
            for url in self.short_urls {
                let path = url.redirect_path();
                let short_link = match self.base_url {
                    Some(base) => format!("{}{}", base.trim_end_matches('/'), path),
                    None => path.clone(),
                };
                html.push_str(&format!(
                    "<li>\n<a href=\"{path}\">{short}</a> &rarr; \
                     <a href=\"{original}\" rel=\"noopener noreferrer\">{original}</a>\n\
                     <span class=\"meta\">{date}</span>\n\
                     <form class=\"inline\" action=\"{delete}\" method=\"post\">\
                     <button type=\"submit\">削除</button></form>\n</li>\n",
                    path = escape_html(&path),
                    short = escape_html(&short_link),
                    original = escape_html(&url.original_url),
                    date = format_date(&url.created_at),
                    delete = url.delete_path(),
                ));
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</section>\n");
    }
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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
