/// Totals for one run of the coaster (wiki) stage.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnrichStats {
    pub titles_listed: u32,
    pub pages_missing: u32,
    pub pages_failed: u32,
    pub rows_written: u32,
}

impl std::fmt::Display for EnrichStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Coaster Scrape Complete ===")?;
        writeln!(f, "Titles listed:  {}", self.titles_listed)?;
        writeln!(f, "Pages missing:  {}", self.pages_missing)?;
        writeln!(f, "Pages failed:   {}", self.pages_failed)?;
        write!(f, "Rows written:   {}", self.rows_written)
    }
}

/// Totals for one run of the video stage.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VideoRunStats {
    pub coasters_seen: u32,
    pub coasters_added: u32,
    pub coasters_skipped: u32,
    pub coasters_without_candidates: u32,
    pub coasters_failed: u32,
    pub rows_appended: u32,
    pub stopped_on_quota: bool,
}

impl std::fmt::Display for VideoRunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Video Run Complete ===")?;
        writeln!(f, "Coasters seen:      {}", self.coasters_seen)?;
        writeln!(f, "Coasters added:     {}", self.coasters_added)?;
        writeln!(f, "Already processed:  {}", self.coasters_skipped)?;
        writeln!(f, "No candidates:      {}", self.coasters_without_candidates)?;
        writeln!(f, "Search failures:    {}", self.coasters_failed)?;
        writeln!(f, "Rows appended:      {}", self.rows_appended)?;
        write!(
            f,
            "Stopped on quota:   {}",
            if self.stopped_on_quota { "yes" } else { "no" }
        )
    }
}
