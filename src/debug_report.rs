use deinflector::{Candidate, DeinflectDetails, Language, ResolveMetrics};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_languages(languages: &[Language], color: bool) {
    let palette = ansi::Palette::new(color);
    for language in languages {
        println!(
            "  {} {}  {} {}",
            palette.bold(palette.paint(format!("{:<4}", language.iso), ansi::GREEN)),
            language.name,
            palette.dim("│ transforms:"),
            palette.paint(language.descriptor.transforms().len().to_string(), ansi::YELLOW),
        );
    }
}

pub fn print_run(language: &Language, details: &DeinflectDetails, color: bool) {
    let palette = ansi::Palette::new(color);
    println!(
        "\n{}",
        palette.bold(palette.paint(format!("⚙  Deinflecting: \"{}\" ({})", details.text, language.name), ansi::CYAN))
    );

    println!("\n{}", palette.paint("━━━ Variants ━━━", ansi::GRAY));
    print_variants(details, &palette);

    println!("\n{}", palette.paint("━━━ Candidates ━━━", ansi::GRAY));
    if details.candidates.iter().all(|c| c.trace.is_empty()) {
        println!("{}", palette.dim("  No transform applied; only the input itself"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • No rule pattern matched the text");
        println!("  • Matching rules were gated out by their input conditions");
        println!("  • Rewritten texts did not carry a dictionary-form condition");
        println!("\n{}", palette.dim("  Tip: Set DEINFLECTOR_DEBUG_RULES=1 to see every rule application"));
    }
    for (idx, candidate) in details.candidates.iter().enumerate() {
        print_candidate(idx, language, candidate, &palette);
    }

    println!("\n{}", palette.paint("━━━ Search ━━━", ansi::GRAY));
    for run in &details.variants {
        println!("  {} {}", palette.paint(format!("\"{}\"", run.source), ansi::BLUE), palette.dim("│"));
        print_metrics(&run.metrics, &palette);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Steps: {}{}",
        palette.paint(format!("{:?}", details.total), ansi::GREEN),
        palette.paint(details.steps().to_string(), ansi::CYAN),
        if details.is_partial() { palette.paint("  │  partial", ansi::RED) } else { String::new() },
    );
    println!();
}

fn print_variants(details: &DeinflectDetails, palette: &ansi::Palette) {
    for run in &details.variants {
        println!("  {} {}", palette.paint(format!("\"{}\"", run.source), ansi::BLUE), fmt_chains(&run.chains, palette));
    }
}

fn print_candidate(idx: usize, language: &Language, candidate: &Candidate, palette: &ansi::Palette) {
    let conditions = language.descriptor.conditions().names(candidate.conditions);
    println!(
        "  {} {} {} {}",
        palette.paint(format!("[{}]", idx), ansi::GRAY),
        palette.bold(palette.paint(&candidate.lemma, ansi::GREEN)),
        palette.dim("│"),
        if conditions.is_empty() {
            palette.dim("any")
        } else {
            palette.paint(conditions.join(", "), ansi::YELLOW)
        },
    );

    if !candidate.trace.is_empty() {
        let steps: Vec<String> = candidate
            .trace
            .iter()
            .map(|frame| format!("{} #{} → {}", frame.display_name, frame.rule_index, frame.text))
            .collect();
        println!(
            "      {} {} {}",
            palette.dim("from:"),
            palette.paint(&candidate.source, ansi::BLUE),
            palette.paint(format!("⟶ {}", steps.join(" ⟶ ")), ansi::CYAN)
        );
    }
    if candidate.processor_chains.iter().any(|chain| !chain.is_empty()) {
        println!("      {} {}", palette.dim("processors:"), fmt_chains(&candidate.processor_chains, palette));
    }
}

fn print_metrics(metrics: &ResolveMetrics, palette: &ansi::Palette) {
    for level in &metrics.levels {
        println!(
            "    {} {} {}  {}",
            palette.paint(format!("Depth {}:", level.depth), ansi::BLUE),
            palette.dim(format!("{} expanded", level.expanded)),
            if level.emitted > 0 {
                palette.paint(format!("✓ {} emitted", level.emitted), ansi::GREEN)
            } else {
                palette.dim(format!("✗ {} emitted", level.emitted))
            },
            palette.dim(format!("{} produced  {:?}", level.produced, level.duration)),
        );
    }
    println!(
        "    {} {}  {} {}  {} {}",
        palette.dim("steps:"),
        palette.paint(metrics.steps.to_string(), ansi::YELLOW),
        palette.dim("hits:"),
        palette.paint(metrics.rule_hits.to_string(), ansi::YELLOW),
        palette.dim("revisits:"),
        palette.paint(metrics.revisits.to_string(), ansi::YELLOW)
    );
    if metrics.depth_limited > 0 {
        println!("    {}", palette.dim(format!("{} nodes at the depth limit", metrics.depth_limited)));
    }
    if let Some(reason) = metrics.stopped_by {
        println!("    {}", palette.paint(format!("stopped early: {reason:?}"), ansi::RED));
    }
    for fault in &metrics.faults {
        println!(
            "    {} {} #{} on \"{}\": {}",
            palette.paint("fault", ansi::RED),
            fault.transform,
            fault.rule_index,
            fault.text,
            palette.dim(&fault.message)
        );
    }
}

fn fmt_chains(chains: &[Vec<&'static str>], palette: &ansi::Palette) -> String {
    let chains: Vec<String> = chains
        .iter()
        .map(|chain| if chain.is_empty() { "(as typed)".to_string() } else { chain.join(" → ") })
        .collect();
    palette.dim(chains.join("  |  "))
}
