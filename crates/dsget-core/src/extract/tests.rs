use super::*;

#[test]
fn empty_text_yields_nothing() {
    assert_eq!(extract_directives(""), Extraction::default());
    assert_eq!(extract_directives("  \n\t"), Extraction::default());
}

#[test]
fn indexed_lookup_translates_one_based_index() {
    let text = r#"
mylist <- c("http://a/x", "http://a/y")
download.file(mylist[2], destfile = paste0(folder, 'out.bin'))
"#;
    let ex = extract_directives(text);
    assert_eq!(ex.directives, vec![Directive::new("http://a/y", "out.bin")]);
    assert!(ex.dropped.is_empty());
}

#[test]
fn direct_literal_call() {
    let ex = extract_directives(r#"download.file("http://b/z.csv", destfile = "z.csv")"#);
    assert_eq!(ex.directives, vec![Directive::new("http://b/z.csv", "z.csv")]);
    assert!(ex.dropped.is_empty());
}

#[test]
fn unknown_binding_is_dropped_without_error() {
    let text = r#"download.file(nothere[1], destfile = paste0(folder, 'a.csv'))"#;
    let ex = extract_directives(text);
    assert!(ex.directives.is_empty());
    assert_eq!(
        ex.dropped,
        vec![Dropped {
            line: 1,
            reason: DropReason::UnknownBinding {
                name: "nothere".to_string()
            }
        }]
    );
}

#[test]
fn out_of_range_and_zero_index_are_dropped() {
    let text = r#"u <- c("http://a/1")
download.file(u[0], destfile = 'zero.bin')
download.file(u[2], destfile = 'two.bin')
download.file(u[1], destfile = 'one.bin')"#;
    let ex = extract_directives(text);
    assert_eq!(ex.directives, vec![Directive::new("http://a/1", "one.bin")]);
    assert_eq!(ex.dropped_count(), 2);
    assert_eq!(ex.dropped[0].line, 2);
    assert_eq!(
        ex.dropped[0].reason,
        DropReason::IndexOutOfRange {
            name: "u".to_string(),
            index: 0
        }
    );
    assert_eq!(ex.dropped[1].line, 3);
}

#[test]
fn loop_index_is_not_guessed() {
    let text = r#"u <- c("http://a/1", "http://a/2")
for (i in seq_along(u)) {
  download.file(u[i], destfile = paste0(folder, basename(u[i])))
}"#;
    let ex = extract_directives(text);
    assert!(ex.directives.is_empty());
    assert_eq!(
        ex.dropped[0].reason,
        DropReason::NonLiteralIndex {
            name: "u".to_string(),
            index: "i".to_string()
        }
    );
}

#[test]
fn indexed_before_literal_each_in_text_order() {
    let text = r#"
download.file("http://lit/1.csv", destfile = "l1.csv")
files <- c("http://idx/a.zip",
           "http://idx/b.zip")
download.file(files[2], destfile = paste0(folder, 'b.zip'))
download.file("http://lit/2.csv", destfile = "l2.csv")
download.file(files[1], destfile = paste0(folder, 'a.zip'))
"#;
    let ex = extract_directives(text);
    assert_eq!(
        ex.directives,
        vec![
            Directive::new("http://idx/b.zip", "b.zip"),
            Directive::new("http://idx/a.zip", "a.zip"),
            Directive::new("http://lit/1.csv", "l1.csv"),
            Directive::new("http://lit/2.csv", "l2.csv"),
        ]
    );
}

#[test]
fn calls_wrapping_across_lines() {
    let text = "download.file(\n  'https://host/data/file.txt',\n  # keep raw bytes\n  destfile = paste0(folder,\n    'file.txt'),\n  mode = 'wb'\n)";
    let ex = extract_directives(text);
    assert_eq!(
        ex.directives,
        vec![Directive::new("https://host/data/file.txt", "file.txt")]
    );
}

#[test]
fn literal_without_destination_yields_nothing() {
    let ex = extract_directives(r#"download.file("http://b/no-dest.csv")"#);
    assert!(ex.directives.is_empty());
    assert_eq!(
        ex.dropped[0].reason,
        DropReason::MissingDestination {
            url: "http://b/no-dest.csv".to_string()
        }
    );
}

#[test]
fn literal_without_destination_takes_next_calls_destination() {
    let text = r#"download.file("http://a/x.zip")
download.file("http://b/y.csv", destfile = "y.csv")"#;
    let ex = extract_directives(text);
    assert_eq!(
        ex.directives,
        vec![
            Directive::new("http://a/x.zip", "y.csv"),
            Directive::new("http://b/y.csv", "y.csv"),
        ]
    );
    assert!(ex.dropped.is_empty());
}

#[test]
fn variable_destination_falls_through_to_later_call() {
    let text = r#"tmp <- tempfile()
download.file("http://a/x.zip", destfile = tmp)
unzip(tmp)
download.file(files[1], destfile = paste0(folder, 'later.csv'))"#;
    let ex = extract_directives(text);
    assert_eq!(
        ex.directives,
        vec![Directive::new("http://a/x.zip", "later.csv")]
    );
    assert_eq!(
        ex.dropped[0].reason,
        DropReason::UnknownBinding {
            name: "files".to_string()
        }
    );
}

#[test]
fn trailing_slash_and_multi_literal_destinations() {
    let text = r#"download.file("http://a/1", destfile = 'dir/')
download.file("http://a/2", destfile = paste0(base, "/raw/", "x.csv"))"#;
    let ex = extract_directives(text);
    assert_eq!(
        ex.directives,
        vec![
            Directive::new("http://a/1", "x.csv"),
            Directive::new("http://a/2", "x.csv"),
        ]
    );
}

#[test]
fn indexed_call_never_borrows_a_destination() {
    let text = r#"u <- c("http://a/1")
download.file(u[1], destfile = tmp)
download.file("http://a/2", destfile = "two.bin")"#;
    let ex = extract_directives(text);
    assert_eq!(ex.directives, vec![Directive::new("http://a/2", "two.bin")]);
    assert_eq!(
        ex.dropped[0].reason,
        DropReason::MissingDestination {
            url: "http://a/1".to_string()
        }
    );
}

#[test]
fn calls_inside_multiline_strings_are_ignored() {
    let text = "usage <- \"run it like\ndownload.file('http://c/doc', destfile = 'doc.txt')\n\"\ndownload.file('http://c/real', destfile = 'real.txt')";
    let ex = extract_directives(text);
    assert_eq!(
        ex.directives,
        vec![Directive::new("http://c/real", "real.txt")]
    );
    assert!(ex.dropped.is_empty());
}

#[test]
fn positional_destination_and_named_url() {
    let text = r#"download.file("http://p/a.csv", "/tmp/x/a.csv")
download.file(destfile = "b.csv", url = "http://p/b.csv")"#;
    let ex = extract_directives(text);
    assert_eq!(
        ex.directives,
        vec![
            Directive::new("http://p/a.csv", "a.csv"),
            Directive::new("http://p/b.csv", "b.csv"),
        ]
    );
}

#[test]
fn duplicate_filenames_pass_through() {
    let text = r#"download.file("http://d/1", destfile = "same.bin")
download.file("http://d/2", destfile = "same.bin")"#;
    let ex = extract_directives(text);
    assert_eq!(ex.directives.len(), 2);
    assert!(ex.directives.iter().all(|d| d.filename == "same.bin"));
}

#[test]
fn unsupported_and_unterminated_calls_are_counted() {
    let text = r#"download.file(url, destfile = "x.csv")
download.file("http://t/1", destfile = "t.csv""#;
    let ex = extract_directives(text);
    assert!(ex.directives.is_empty());
    assert_eq!(
        ex.dropped[0].reason,
        DropReason::UnsupportedSource {
            expression: "url".to_string()
        }
    );
    assert_eq!(ex.dropped[1].reason, DropReason::Unterminated);
}

#[test]
fn redeclared_list_uses_latest_prior_declaration() {
    let text = r#"u <- c("http://v1/a")
download.file(u[1], destfile = 'first.bin')
u <- c("http://v2/a")
download.file(u[1], destfile = 'second.bin')"#;
    let ex = extract_directives(text);
    assert_eq!(
        ex.directives,
        vec![
            Directive::new("http://v1/a", "first.bin"),
            Directive::new("http://v2/a", "second.bin"),
        ]
    );
}

#[test]
fn double_bracket_index() {
    let text = r#"srcs <- list("http://l/1", "http://l/2")
download.file(srcs[[2]], destfile = file.path(folder, "two.dat"))"#;
    let ex = extract_directives(text);
    assert_eq!(ex.directives, vec![Directive::new("http://l/2", "two.dat")]);
}

#[test]
fn bindings_do_not_leak_between_descriptors() {
    let first = r#"shared <- c("http://a/1")
download.file(shared[1], destfile = 'a.bin')"#;
    let second = r#"download.file(shared[1], destfile = 'a.bin')"#;
    assert_eq!(extract_directives(first).directives.len(), 1);
    let ex = extract_directives(second);
    assert!(ex.directives.is_empty());
    assert_eq!(ex.dropped_count(), 1);
}

#[test]
fn commented_out_calls_are_ignored() {
    let text = r#"download.file("http://c/real.csv", # not download.file("http://c/fake", 'f')
  destfile = "real.csv")"#;
    let ex = extract_directives(text);
    assert_eq!(
        ex.directives,
        vec![Directive::new("http://c/real.csv", "real.csv")]
    );
    assert!(ex.dropped.is_empty());

    let ex = extract_directives("# download.file('http://c/old', destfile = 'old.csv')");
    assert_eq!(ex, Extraction::default());
}

#[test]
fn drop_reason_display() {
    assert_eq!(
        DropReason::UnknownBinding {
            name: "x".to_string()
        }
        .to_string(),
        "unknown list `x`"
    );
    assert_eq!(DropReason::Unterminated.to_string(), "unterminated call");
}
