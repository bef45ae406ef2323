use lightbox_core::page::{ImageId, Page, PageNode};
use lightbox_core::viewer::ViewerController;

const SITE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>PAM4 Receiver &amp; Friends</title>
    <link rel="stylesheet" href="assets/style.css">
    <style>.nav > li { color: red; }</style>
</head>
<body class="home">
    <nav class="navbar">
        <div class="nav-logo"><img src="images/logo.png" alt="PAM4 logo"></div>
        <button class="nav-toggle" disabled><span class="bar"></span></button>
    </nav>
    <section id="results">
        <figure class="image-container">
            <img src="images/eye_diagram.png" alt="Eye diagram" class="zoomable wide">
            <figcaption>Eye diagram at 300&nbsp;MHz</figcaption>
        </figure>
        <p>Decision accuracy <b>96%</b><br>
        <img src='images/constellation.png' alt="Constellation"/>
    </section>
    <script>
        if (a < b && c > d) { document.write("<img src='images/fake.png'>"); }
    </script>
    <footer>
        <div class="visitor-counter"><img src="https://hits.example/badge.svg" alt="Hits"></div>
    </footer>
</body>
</html>
"#;

#[test]
fn test_html_finds_images_in_document_order() {
    let page = Page::from_html("/PAM4Receiver/index.html", SITE_HTML).unwrap();
    let srcs: Vec<_> = page.images().iter().map(|img| img.src.clone()).collect();
    assert_eq!(
        srcs,
        vec![
            "images/logo.png",
            "images/eye_diagram.png",
            "images/constellation.png",
            "https://hits.example/badge.svg",
        ]
    );
    let ids: Vec<_> = page.images().iter().map(|img| img.id).collect();
    assert_eq!(ids, vec![ImageId(0), ImageId(1), ImageId(2), ImageId(3)]);
}

#[test]
fn test_html_keeps_classes_and_ancestors() {
    let page = Page::from_html("/index.html", SITE_HTML).unwrap();
    let images = page.images();

    assert!(images[0].has_class("nav-logo"));
    assert!(images[0].has_class("navbar"));
    assert!(images[0].has_class("home"));
    assert_eq!(images[1].classes, vec!["zoomable", "wide"]);
    assert!(images[1].has_class("image-container"));
    assert!(images[3].has_class("VISITOR-COUNTER"));
    assert!(!images[2].has_class("image-container"));
}

#[test]
fn test_html_figure_caption_and_alt_fallback() {
    let page = Page::from_html("/index.html", SITE_HTML).unwrap();
    let images = page.images();

    assert_eq!(images[1].caption.as_deref(), Some("Eye diagram at 300 MHz"));
    assert_eq!(images[2].caption, None);

    let image_ref = images[2].image_ref().unwrap();
    assert_eq!(image_ref.caption_text(), "Constellation");
    assert_eq!(image_ref.alt_text(), "Constellation");
}

#[test]
fn test_html_script_contents_are_not_scanned() {
    let page = Page::from_html("/index.html", SITE_HTML).unwrap();
    assert!(page.images().iter().all(|img| img.src != "images/fake.png"));
}

#[test]
fn test_html_without_images_or_structure() {
    let page = Page::from_html("/empty.html", "<p>No pictures here").unwrap();
    assert!(page.images().is_empty());

    let page = Page::from_html("/empty.html", "").unwrap();
    assert!(page.images().is_empty());
}

#[test]
fn test_html_unbalanced_end_tags_are_tolerated() {
    let html = "<div class=\"a\"><span></div></span><img src=\"images/x.png\" alt=\"x\">";
    let page = Page::from_html("/index.html", html).unwrap();
    let images = page.images();
    assert_eq!(images.len(), 1);
    assert!(!images[0].has_class("a"));
}

#[test]
fn test_html_unclosed_comment_keeps_earlier_images() {
    let html = "<figure class=\"shot\"><img src=\"images/a.png\" alt=\"A\"></figure><!-- oops";
    let page = Page::from_html("/index.html", html).unwrap();
    let images = page.images();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].src, "images/a.png");
    assert!(images[0].has_class("shot"));
}

#[test]
fn test_default_viewer_attaches_only_content_images() {
    let page = Page::from_html("/index.html", SITE_HTML).unwrap();
    let mut viewer = ViewerController::default();
    assert_eq!(viewer.attach(page.root()), 2);

    let images = page.images();
    assert!(!viewer.is_clickable(images[0].id));
    assert!(viewer.is_clickable(images[1].id));
    assert!(viewer.is_clickable(images[2].id));
    assert!(!viewer.is_clickable(images[3].id));
}

#[test]
fn test_insert_assigns_fresh_ids_and_ancestors() {
    let mut page = Page::from_html("/index.html", SITE_HTML).unwrap();
    let mut viewer = ViewerController::default();
    viewer.attach(page.root());

    let ids = page.insert(
        PageNode::element(
            "div",
            &["lazy-gallery"],
            vec![PageNode::Image(
                lightbox_core::page::PageImage::new("images/late.png", "Late"),
            )],
        ),
        &mut viewer,
    );

    assert_eq!(ids, vec![ImageId(4)]);
    let inserted = page.image(ids[0]).unwrap();
    assert!(inserted.has_class("lazy-gallery"));
    assert!(inserted.has_class("home"));
    assert!(viewer.is_clickable(ids[0]));
}

#[test]
fn test_image_mut_updates_in_place() {
    let mut page = Page::from_html("/index.html", SITE_HTML).unwrap();
    let id = page.images()[2].id;
    page.image_mut(id).unwrap().src = "/images/constellation.png".into();
    assert_eq!(page.image(id).unwrap().src, "/images/constellation.png");
    assert!(page.image_mut(ImageId(99)).is_none());
}
