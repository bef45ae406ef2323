use console::Style;
use lightbox_core::page::{ImageId, Page};
use lightbox_core::probe::Resolution;
use lightbox_core::viewer::ExemptionRules;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    ok: Style,
    repaired: Style,
    broken: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            ok: Style::new().green(),
            repaired: Style::new().yellow(),
            broken: Style::new().red().bold(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_probe_summary(page: &Page, results: &[(ImageId, Resolution)]) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Image Probe"));
    println!("  {}", s.title.apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}"));
    println!();
    println!("  {:<12}{}", s.label.apply_to("Page"), s.path.apply_to(page.path()));
    println!();

    let mut counts = [0usize; 4];
    for (id, resolution) in results {
        let src = page
            .image(*id)
            .map(|img| img.src.as_str())
            .unwrap_or_default();
        match resolution {
            Resolution::Loaded => {
                counts[0] += 1;
                println!("    {:<6}{} {}", s.label.apply_to(id), s.ok.apply_to("ok      "), src);
            }
            Resolution::Repaired { attempts, .. } => {
                counts[1] += 1;
                println!(
                    "    {:<6}{} {} {}",
                    s.label.apply_to(id),
                    s.repaired.apply_to("repaired"),
                    src,
                    s.label.apply_to(format!("(variation {attempts})"))
                );
            }
            Resolution::Broken { tried } => {
                counts[2] += 1;
                println!("    {:<6}{} {}", s.label.apply_to(id), s.broken.apply_to("broken  "), src);
                for candidate in tried {
                    println!("            {}", s.label.apply_to(candidate));
                }
            }
            Resolution::Skipped => {
                counts[3] += 1;
                println!("    {:<6}{} {}", s.label.apply_to(id), s.disabled.apply_to("skipped "), src);
            }
        }
    }

    println!();
    println!(
        "  {:<12}{}",
        s.label.apply_to("Loaded"),
        s.value.apply_to(counts[0])
    );
    println!(
        "  {:<12}{}",
        s.label.apply_to("Repaired"),
        s.repaired.apply_to(counts[1])
    );
    println!(
        "  {:<12}{}",
        s.label.apply_to("Broken"),
        s.broken.apply_to(counts[2])
    );
    println!(
        "  {:<12}{}",
        s.label.apply_to("Skipped"),
        s.disabled.apply_to(counts[3])
    );
    println!();
}

pub fn print_image_table(page: &Page, exemptions: &ExemptionRules) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Page Images"));
    println!("  {}", s.title.apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}"));
    println!();

    let images = page.images();
    if images.is_empty() {
        println!("  {}", s.disabled.apply_to("no images"));
        println!();
        return;
    }

    for img in images {
        let status = match exemptions.exemption(img) {
            Some(reason) => s.disabled.apply_to(format!("exempt ({reason})")),
            None if img.src.trim().is_empty() => s.broken.apply_to("no source".to_string()),
            None => s.ok.apply_to("clickable".to_string()),
        };
        println!("  {:<6}{}", s.label.apply_to(img.id), s.path.apply_to(&img.src));
        println!("        {:<10}{}", s.label.apply_to("Alt"), s.value.apply_to(&img.alt));
        if let Some(ref caption) = img.caption {
            println!("        {:<10}{}", s.label.apply_to("Caption"), caption);
        }
        println!("        {:<10}{}", s.label.apply_to("Viewer"), status);
    }
    println!();
}
