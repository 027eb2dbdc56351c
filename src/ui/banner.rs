// Tue Jan 13 2026 - Alex

use colored::*;

pub struct Banner {
    title: String,
    subtitle: Option<String>,
    use_color: bool,
    width: usize,
}

impl Banner {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: None,
            use_color: true,
            width: 46,
        }
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn render(&self) -> String {
        let inner_width = self.width.saturating_sub(2).max(self.title.chars().count());
        let h_line = "═".repeat(inner_width);
        let mut lines = vec![format!("╔{}╗", h_line)];

        let title_line = format!("{:^width$}", self.title, width = inner_width);
        if self.use_color {
            lines.push(format!("║{}║", title_line.cyan().bold()));
        } else {
            lines.push(format!("║{}║", title_line));
        }

        if let Some(subtitle) = &self.subtitle {
            lines.push(format!("║{:^width$}║", subtitle, width = inner_width));
        }

        lines.push(format!("╚{}╝", h_line));
        lines.join("\n")
    }

    pub fn print(&self) {
        println!();
        println!("{}", self.render());
        println!();
    }

    pub fn prog05() -> Self {
        Self::new("PROG05 - A modern 68HC705C8 Programmer")
            .with_subtitle(&format!("Version {}", env!("CARGO_PKG_VERSION")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_box() {
        let text = Banner::new("PROG05").with_subtitle("v1").with_width(12).with_color(false).render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "╔══════════╗");
        assert_eq!(lines[1], "║  PROG05  ║");
        assert_eq!(lines[3], "╚══════════╝");
    }
}
