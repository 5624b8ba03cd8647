//! Careers page fixtures and a throwaway HTTP responder for tests.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use reqwest::Url;
use reqwest::blocking::Client;

pub fn row(title: &str, columns: &[&str]) -> String {
    let secondary: String = columns
        .iter()
        .map(|c| format!("<div class=\"job-row__col job-row__col--secondary\">{c}</div>"))
        .collect();
    format!(
        "<li class=\"job-row\"><a href=\"/en/j/1\">\
         <div class=\"job-row__col job-row__col--primary\">{title}</div>{secondary}</a></li>"
    )
}

pub fn job_list(rows: &[String]) -> String {
    format!(
        "<ul class=\"job-list__body list--unstyled\">{}</ul>",
        rows.concat()
    )
}

pub fn page_with_lists(lists: &[String]) -> String {
    format!(
        "<html><body><div class=\"job-list\"><ul class=\"job-list__head\"><li>Role</li></ul>\
         {}</div></body></html>",
        lists.concat()
    )
}

pub fn page(rows: &[String]) -> String {
    page_with_lists(&[job_list(rows)])
}

/// Client that never routes loopback requests through an env proxy.
pub fn client() -> Client {
    Client::builder().no_proxy().build().expect("test client")
}

/// Serves canned `(status, body)` responses by request path until the test
/// process exits. Unknown paths get a 404.
pub fn serve(routes: Vec<(&'static str, u16, String)>) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    let routes: HashMap<_, _> = routes
        .into_iter()
        .map(|(path, status, body)| (path, (status, body)))
        .collect();

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let _ = respond(stream, &routes);
        }
    });

    Url::parse(&format!("http://{addr}/")).expect("server url")
}

fn respond(
    mut stream: TcpStream,
    routes: &HashMap<&'static str, (u16, String)>,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let path = request_line.split_whitespace().nth(1).unwrap_or("/").to_owned();

    let mut content_length = 0;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header.trim().is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }
    let mut body = vec![0; content_length];
    reader.read_exact(&mut body)?;

    let (status, body) = routes
        .get(path.as_str())
        .map_or((404, ""), |(status, body)| (*status, body.as_str()));
    write!(
        stream,
        "HTTP/1.1 {status} Status\r\nContent-Type: text/html; charset=utf-8\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )?;
    stream.flush()
}
