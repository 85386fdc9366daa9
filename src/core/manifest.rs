use crate::domain::model::{ManifestEntry, RowId, SectionId};
use crate::domain::ports::Resolver;
use crate::utils::error::{NormalizerError, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const MANIFEST_COLUMNS: [&str; 4] = ["section_id", "section_name", "row_id", "row_name"];

#[derive(Debug, Clone)]
struct SectionEntry {
    id: SectionId,
    rows: HashMap<String, RowId>,
}

/// 由清單 CSV 建立的唯讀查詢索引
///
/// 名稱比對為逐位元組精確比對，不做大小寫或空白正規化。
/// 建構完成後沒有任何修改介面。
#[derive(Debug, Clone, Default)]
pub struct ManifestIndex {
    sections: HashMap<String, SectionEntry>,
}

impl ManifestIndex {
    /// 從檔案載入清單；任何錯誤都會放棄整份索引
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Reading manifest from {}", path.display());

        let file = File::open(path).map_err(|source| NormalizerError::ManifestNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let index = Self::from_reader(file)?;

        tracing::info!(
            "📋 Loaded manifest {}: {} sections, {} rows",
            path.display(),
            index.section_count(),
            index.row_count()
        );
        Ok(index)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers().map_err(format_error)?;
        if !headers.is_empty() && !headers.iter().map(str::trim).eq(MANIFEST_COLUMNS) {
            tracing::warn!(
                "Manifest header {:?} does not match expected columns {:?}; reading by position",
                headers.iter().collect::<Vec<_>>(),
                MANIFEST_COLUMNS
            );
        }

        let mut builder = IndexBuilder::default();
        for result in csv_reader.records() {
            let record = result.map_err(format_error)?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            match parse_line(&record, line)? {
                ManifestLine::Section { id, name } => {
                    builder.add_section(line, id, name)?;
                }
                ManifestLine::Row(entry) => builder.add_row(line, &entry)?,
            }
        }

        Ok(builder.finish())
    }

    /// 從已解析的條目建立索引，條目順序視為行號
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = ManifestEntry>,
    {
        let mut builder = IndexBuilder::default();
        for (i, entry) in entries.into_iter().enumerate() {
            builder.add_row(i as u64 + 1, &entry)?;
        }
        Ok(builder.finish())
    }

    pub fn resolve_section(&self, name: &str) -> Option<SectionId> {
        self.sections.get(name).map(|s| s.id)
    }

    /// 未知的 section 直接回傳 None，不視為錯誤
    pub fn resolve_row(&self, section_name: &str, row_name: &str) -> Option<RowId> {
        self.sections
            .get(section_name)
            .and_then(|s| s.rows.get(row_name))
            .copied()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn row_count(&self) -> usize {
        self.sections.values().map(|s| s.rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Resolver for ManifestIndex {
    fn resolve_section(&self, name: &str) -> Option<SectionId> {
        ManifestIndex::resolve_section(self, name)
    }

    fn resolve_row(&self, section_name: &str, row_name: &str) -> Option<RowId> {
        ManifestIndex::resolve_row(self, section_name, row_name)
    }
}

enum ManifestLine<'a> {
    // row_id 與 row_name 皆空白：只有 section，沒有 row (例如包廂)
    Section { id: SectionId, name: &'a str },
    Row(ManifestEntry),
}

fn parse_line(record: &csv::StringRecord, line: u64) -> Result<ManifestLine<'_>> {
    if record.len() < MANIFEST_COLUMNS.len() {
        return Err(NormalizerError::ManifestFormat {
            line,
            message: format!(
                "expected {} fields, found {}",
                MANIFEST_COLUMNS.len(),
                record.len()
            ),
        });
    }

    let section_id = parse_id(&record[0], "section_id", line)?;
    let section_name = &record[1];
    let raw_row_id = &record[2];
    let row_name = &record[3];

    if raw_row_id.trim().is_empty() && row_name.is_empty() {
        return Ok(ManifestLine::Section {
            id: section_id,
            name: section_name,
        });
    }

    let row_id = parse_id(raw_row_id, "row_id", line)?;
    Ok(ManifestLine::Row(ManifestEntry::new(
        section_id,
        section_name,
        row_id,
        row_name,
    )))
}

fn parse_id(field: &str, column: &str, line: u64) -> Result<u32> {
    field
        .trim()
        .parse::<u32>()
        .map_err(|_| NormalizerError::ManifestFormat {
            line,
            message: format!("column '{}' has non-integer value '{}'", column, field),
        })
}

fn format_error(err: csv::Error) -> NormalizerError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    NormalizerError::ManifestFormat {
        line,
        message: err.to_string(),
    }
}

#[derive(Default)]
struct IndexBuilder {
    sections: HashMap<String, SectionEntry>,
}

impl IndexBuilder {
    fn add_section(&mut self, line: u64, id: SectionId, name: &str) -> Result<&mut SectionEntry> {
        match self.sections.entry(name.to_string()) {
            Entry::Occupied(existing) => {
                if existing.get().id != id {
                    return Err(NormalizerError::ManifestConflict {
                        line,
                        message: format!(
                            "section '{}' already has id {}, found {}",
                            name,
                            existing.get().id,
                            id
                        ),
                    });
                }
                Ok(existing.into_mut())
            }
            Entry::Vacant(slot) => Ok(slot.insert(SectionEntry {
                id,
                rows: HashMap::new(),
            })),
        }
    }

    fn add_row(&mut self, line: u64, entry: &ManifestEntry) -> Result<()> {
        let section = self.add_section(line, entry.section_id, &entry.section_name)?;

        match section.rows.entry(entry.row_name.clone()) {
            Entry::Occupied(existing) if *existing.get() != entry.row_id => {
                Err(NormalizerError::ManifestConflict {
                    line,
                    message: format!(
                        "row '{}' of section '{}' already has id {}, found {}",
                        entry.row_name,
                        entry.section_name,
                        existing.get(),
                        entry.row_id
                    ),
                })
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(entry.row_id);
                Ok(())
            }
        }
    }

    fn finish(self) -> ManifestIndex {
        ManifestIndex {
            sections: self.sections,
        }
    }
}
