//! Wunderlist export → Org outline conversion.
//! The `writer` owns all text emission; the `mapper` walks the export and drives it.
//! Everything here is pure except `loader`, which reads files.

pub mod error {
    /// Fatal conversion failures. Unparseable dates and absent optional fields
    /// never surface here; they only suppress output fragments.
    #[derive(Debug, thiserror::Error)]
    pub enum ConvertError {
        #[error("invalid input: {0}")]
        Input(&'static str),
        #[error("heading depth {0} is negative")]
        InvalidDepth(i64),
        #[error("malformed export: {0}")]
        Parse(#[from] serde_json::Error),
    }
}

pub mod model {
    //! Input records of a Wunderlist export.
    //!
    //! Missing keys and explicit `null` both mean "absent": optional values become
    //! `None`, collections and flags fall back to their defaults.

    use serde::Deserialize;
    use serde_with::{DefaultOnNull, serde_as};

    #[serde_as]
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct TodoList {
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub title: String,
        pub folder: Option<Folder>,
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub tasks: Vec<Task>,
    }

    #[serde_as]
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
    #[serde(default)]
    pub struct Folder {
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub title: String,
    }

    #[serde_as]
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct Task {
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub title: String,
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub starred: bool,
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub completed: bool,
        /// Raw date text; parsed lazily by the mapper.
        pub due_date: Option<String>,
        pub created_by: Option<Person>,
        pub created_at: Option<String>,
        pub completed_by: Option<Person>,
        pub completed_at: Option<String>,
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub reminders: Vec<Reminder>,
        pub assignee: Option<Person>,
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub notes: Vec<Note>,
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub comments: Vec<Comment>,
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub files: Vec<FileRef>,
    }

    #[serde_as]
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
    #[serde(default)]
    pub struct Person {
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub name: String,
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub email: String,
    }

    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct Reminder {
        pub remind_at: Option<String>,
    }

    #[serde_as]
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
    #[serde(default)]
    pub struct Note {
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub content: String,
    }

    #[serde_as]
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
    #[serde(default)]
    pub struct Comment {
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub author: Person,
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub text: String,
    }

    #[serde_as]
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct FileRef {
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub file_name: String,
        #[serde_as(deserialize_as = "DefaultOnNull")]
        pub file_path: String,
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn nulls_and_missing_keys_fall_back_to_defaults() {
            let json = r#"{
                "title": "Inbox",
                "folder": null,
                "tasks": [
                    { "title": "Call", "starred": null, "reminders": null, "notes": null }
                ]
            }"#;
            let list: TodoList = serde_json::from_str(json).expect("parse");
            assert_eq!(list.folder, None);
            let task = &list.tasks[0];
            assert!(!task.starred);
            assert!(!task.completed);
            assert!(task.reminders.is_empty());
            assert!(task.notes.is_empty());
            assert_eq!(task.created_by, None);
            assert_eq!(task.due_date, None);
        }

        #[test]
        fn camel_case_keys_map_to_fields() {
            let json = r#"{
                "title": "Call",
                "dueDate": "2020-03-01T10:00:00Z",
                "createdBy": { "name": "Ada", "email": "ada@example.com" },
                "reminders": [ { "remindAt": "2020-02-29T07:00:00Z" } ],
                "files": [ { "fileName": "a.txt", "filePath": "/tmp/a.txt" } ],
                "unknownField": 42
            }"#;
            let task: Task = serde_json::from_str(json).expect("parse");
            assert_eq!(task.due_date.as_deref(), Some("2020-03-01T10:00:00Z"));
            assert_eq!(task.created_by.map(|p| p.name).as_deref(), Some("Ada"));
            assert_eq!(
                task.reminders[0].remind_at.as_deref(),
                Some("2020-02-29T07:00:00Z")
            );
            assert_eq!(task.files[0].file_path, "/tmp/a.txt");
        }
    }
}

pub mod dates {
    use chrono::NaiveDateTime;

    /// Accepted export layouts, tried in order.
    const EXPORT_LAYOUTS: [&str; 3] = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S",
    ];

    /// Exports carry at most microseconds.
    const MAX_FRACTION_DIGITS: usize = 6;

    /// Parse an export date. The first matching layout wins; anything else is `None`.
    /// Zone suffixes are not applied: the wall-clock value is kept as written.
    pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
        if fraction_digits(raw) > MAX_FRACTION_DIGITS {
            return None;
        }
        EXPORT_LAYOUTS
            .iter()
            .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
    }

    fn fraction_digits(raw: &str) -> usize {
        raw.rsplit_once('.')
            .map_or(0, |(_, frac)| frac.trim_end_matches('Z').len())
    }

    /// `YYYY-MM-DD Www HH:MM`, the body of an Org timestamp.
    pub fn format_org_date(date: &NaiveDateTime) -> String {
        date.format("%Y-%m-%d %a %H:%M").to_string()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn accepts_all_three_layouts() {
            for raw in [
                "2020-03-01T10:00:00.000Z",
                "2020-03-01T10:00:00.123456Z",
                "2020-03-01T10:00:00Z",
                "2020-03-01T10:00:00",
            ] {
                let date = parse_date(raw).unwrap_or_else(|| panic!("{raw} should parse"));
                assert_eq!(format_org_date(&date), "2020-03-01 Sun 10:00");
            }
        }

        #[test]
        fn rejects_other_text() {
            assert_eq!(parse_date("not-a-date"), None);
            assert_eq!(parse_date(""), None);
            assert_eq!(parse_date("2020-03-01"), None);
            assert_eq!(parse_date("2020-03-01 10:00:00"), None);
            assert_eq!(parse_date("2020-13-01T10:00:00Z"), None);
        }

        #[test]
        fn fraction_is_limited_to_microseconds() {
            assert!(parse_date("2020-03-01T10:00:00.1Z").is_some());
            assert!(parse_date("2020-03-01T10:00:00.123456Z").is_some());
            assert_eq!(parse_date("2020-03-01T10:00:00.1234567Z"), None);
            assert_eq!(parse_date("2020-03-01T10:00:00.123456789Z"), None);
        }
    }
}

pub mod tags {
    //! `#tag` extraction from list and task titles.
    //!
    //! Titles are split into whitespace, tag, and word tokens with `nom`. A tag is a
    //! token that starts with `#` and has at least one more non-whitespace character.

    use nom::{
        IResult,
        branch::alt,
        bytes::complete::{take_till1, take_while1},
        character::complete::char,
        combinator::{map, recognize},
        multi::many0,
        sequence::preceded,
    };

    /// A title with its tag markers removed, plus the markers in order of appearance.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct TaggedTitle {
        pub title: String,
        pub tags: Vec<String>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Token<'a> {
        Space(&'a str),
        Tag(&'a str),
        Word(&'a str),
    }

    fn is_space(c: char) -> bool {
        c.is_whitespace()
    }

    fn token(i: &str) -> IResult<&str, Token<'_>> {
        alt((
            map(take_while1(is_space), Token::Space),
            map(
                recognize(preceded(char('#'), take_till1(is_space))),
                Token::Tag,
            ),
            map(take_till1(is_space), Token::Word),
        ))(i)
    }

    fn tokenize(input: &str) -> Vec<Token<'_>> {
        match many0(token)(input) {
            Ok((_, tokens)) => tokens,
            Err(_) => vec![Token::Word(input)],
        }
    }

    /// Pull `#tag` tokens out of `title`.
    ///
    /// Each tag is removed together with the whitespace run in front of it, so the
    /// whitespace after it keeps the neighbouring words apart. A tag with nothing in
    /// front of it takes the following whitespace instead. A line break in front of
    /// a tag is kept unless the run after the tag carries its own line break.
    pub fn extract_tags(title: &str) -> TaggedTitle {
        let mut kept: Vec<&str> = Vec::new();
        let mut tags = Vec::new();
        // Drop the next whitespace run.
        let mut skip_space = false;
        // The run in front of a removed tag was a kept line break.
        let mut held_break = false;

        for tok in tokenize(title) {
            match tok {
                Token::Tag(tag) => {
                    tags.push(tag.to_string());
                    let before = kept.last().filter(|s| s.starts_with(is_space)).copied();
                    match before {
                        Some(space) if space.contains('\n') => held_break = true,
                        Some(_) => {
                            kept.pop();
                        }
                        None => {}
                    }
                    skip_space = held_break || kept.is_empty();
                }
                Token::Space(space) => {
                    if skip_space {
                        skip_space = false;
                        if held_break && space.contains('\n') {
                            kept.pop();
                            kept.push(space);
                        }
                    } else {
                        kept.push(space);
                    }
                }
                Token::Word(word) => {
                    skip_space = false;
                    held_break = false;
                    kept.push(word);
                }
            }
        }

        // A held line break with nothing after it would dangle at the end.
        if held_break {
            kept.pop();
        }

        TaggedTitle {
            title: kept.concat(),
            tags,
        }
    }

}

pub mod writer {
    //! Depth-tracked, append-only Org text emission.
    //!
    //! The writer knows nothing about exports. Nested regions (deeper headings,
    //! drawers) are [`Scope`] guards: the exit action runs when the guard drops, so
    //! it happens on normal completion, on `?` early returns, and while unwinding.

    use crate::dates::format_org_date;
    use crate::error::ConvertError;
    use chrono::NaiveDateTime;
    use std::ops::{Deref, DerefMut};

    #[derive(Debug, Clone, Default)]
    pub struct OrgWriter {
        depth: usize,
        buf: String,
    }

    /// Arguments for [`OrgWriter::node`].
    #[derive(Debug, Clone, Copy, Default)]
    pub struct Node<'a> {
        pub title: &'a str,
        pub content: Option<&'a str>,
        pub tags: &'a [String],
        pub timestamp: Option<NaiveDateTime>,
        pub timestamp_type: Option<&'a str>,
        pub todo_state: Option<&'a str>,
    }

    impl OrgWriter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_depth(depth: usize) -> Self {
            Self {
                depth,
                buf: String::new(),
            }
        }

        pub fn depth(&self) -> usize {
            self.depth
        }

        pub fn as_str(&self) -> &str {
            &self.buf
        }

        /// Hand over the finished document.
        pub fn finish(self) -> String {
            self.buf
        }

        pub fn append(&mut self, text: &str, newline: bool) -> &mut Self {
            self.buf.push_str(text);
            if newline {
                self.buf.push('\n');
            }
            self
        }

        /// Append `text` and end the line.
        pub fn emit(&mut self, text: &str) -> &mut Self {
            self.append(text, true)
        }

        /// Append `text` and leave the line open.
        pub fn emit_inline(&mut self, text: &str) -> &mut Self {
            self.append(text, false)
        }

        pub fn blank_line(&mut self) -> &mut Self {
            self.append("", true)
        }

        /* ------------------------------- Depth ------------------------------- */

        pub fn set_depth(&mut self, level: i64) -> Result<&mut Self, ConvertError> {
            self.depth = usize::try_from(level).map_err(|_| ConvertError::InvalidDepth(level))?;
            Ok(self)
        }

        pub fn raise_depth(&mut self) -> &mut Self {
            self.depth += 1;
            self
        }

        pub fn lower_depth(&mut self) -> &mut Self {
            self.depth = self.depth.saturating_sub(1);
            self
        }

        /// Enter a nested region at `target` (one level deeper when `None`).
        /// The previous depth comes back when the returned guard drops.
        pub fn scoped_depth(&mut self, target: Option<i64>) -> Result<Scope<'_>, ConvertError> {
            let previous = self.depth;
            let target = target.unwrap_or(previous as i64 + 1);
            self.set_depth(target)?;
            Ok(Scope::enter(self, ScopeExit::RestoreDepth(previous)))
        }

        /// Open a `:NAME:` drawer; `:END:` is written when the guard drops.
        pub fn drawer(&mut self, name: &str) -> Scope<'_> {
            self.emit(&format!(":{}:", name.to_uppercase()));
            Scope::enter(self, ScopeExit::CloseDrawer)
        }

        /* ------------------------------ Elements ------------------------------ */

        pub fn heading(
            &mut self,
            title: &str,
            todo_state: Option<&str>,
            tags: &[String],
        ) -> &mut Self {
            let mut line = "*".repeat(self.depth + 1);
            if let Some(state) = todo_state {
                line.push(' ');
                line.push_str(&state.to_uppercase());
            }
            line.push(' ');
            line.push_str(title);
            if !tags.is_empty() {
                let upper: Vec<String> = tags.iter().map(|t| t.to_uppercase()).collect();
                line.push_str(" :");
                line.push_str(&upper.join(":"));
                line.push(':');
            }
            self.emit(&line)
        }

        /// Absent dates write nothing.
        pub fn timestamp(
            &mut self,
            date: Option<NaiveDateTime>,
            kind: Option<&str>,
            active: bool,
            newline: bool,
        ) -> &mut Self {
            let Some(date) = date else {
                return self;
            };

            let mut stamp = match kind {
                Some(kind) => format!("{}: ", kind.to_uppercase()),
                None => String::new(),
            };
            let body = format_org_date(&date);
            if active {
                stamp.push_str(&format!("<{body}>"));
            } else {
                stamp.push_str(&format!("[{body}]"));
            }
            self.append(&stamp, newline)
        }

        /// Heading, planning timestamp, then raw content.
        pub fn node(&mut self, node: Node<'_>) -> &mut Self {
            self.heading(node.title, node.todo_state, node.tags);
            self.timestamp(node.timestamp, node.timestamp_type, true, true);
            if let Some(content) = node.content.filter(|c| !c.is_empty()) {
                self.emit(content);
            }
            self
        }

        /// `:NAME: value`. Without a value the line stays open for a timestamp.
        pub fn property(&mut self, name: &str, value: Option<&str>) -> &mut Self {
            self.emit_inline(&format!(":{}: ", name.to_uppercase()));
            match value {
                Some(value) => self.emit(value),
                None => self,
            }
        }

        pub fn list_item(&mut self, text: &str) -> &mut Self {
            self.emit(&format!(" - {text}"))
        }

        /// Free text followed by a blank line, with a leading `*` run neutralized.
        pub fn content(&mut self, text: &str) -> &mut Self {
            let text = sanitize_text(text);
            self.emit(&text);
            self.blank_line()
        }
    }

    /// Replace a leading run of `*` with a single `+` so body text never parses as a heading.
    pub fn sanitize_text(text: &str) -> String {
        let rest = text.trim_start_matches('*');
        if rest.len() == text.len() {
            text.to_string()
        } else {
            format!("+{rest}")
        }
    }

    /* -------------------------------- Scopes -------------------------------- */

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum ScopeExit {
        RestoreDepth(usize),
        CloseDrawer,
    }

    /// Guard for a nested writer region. Derefs to the writer it borrows.
    #[must_use = "the region closes as soon as the scope is dropped"]
    pub struct Scope<'w> {
        writer: &'w mut OrgWriter,
        exit: ScopeExit,
    }

    impl<'w> Scope<'w> {
        fn enter(writer: &'w mut OrgWriter, exit: ScopeExit) -> Self {
            Self { writer, exit }
        }
    }

    impl Deref for Scope<'_> {
        type Target = OrgWriter;

        fn deref(&self) -> &OrgWriter {
            self.writer
        }
    }

    impl DerefMut for Scope<'_> {
        fn deref_mut(&mut self) -> &mut OrgWriter {
            self.writer
        }
    }

    impl Drop for Scope<'_> {
        fn drop(&mut self) {
            match self.exit {
                ScopeExit::RestoreDepth(depth) => self.writer.depth = depth,
                ScopeExit::CloseDrawer => {
                    self.writer.emit(":END:");
                }
            }
        }
    }

}

pub mod mapper {
    //! Walks an export top-down and drives an [`OrgWriter`].
    //!
    //! Order per task: headline (+ DEADLINE), PROPERTIES drawer, notes, Comments,
    //! Files. Nothing is revisited once written.

    use crate::dates::parse_date;
    use crate::error::ConvertError;
    use crate::model::{Comment, FileRef, Person, Task, TodoList};
    use crate::tags::extract_tags;
    use crate::writer::{Node, OrgWriter};
    use chrono::NaiveDateTime;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TodoState {
        Next,
        Done,
        Todo,
    }

    impl TodoState {
        /// Starred wins over completed.
        pub fn of(task: &Task) -> Self {
            if task.starred {
                Self::Next
            } else if task.completed {
                Self::Done
            } else {
                Self::Todo
            }
        }

        pub fn keyword(self) -> &'static str {
            match self {
                Self::Next => "next",
                Self::Done => "done",
                Self::Todo => "todo",
            }
        }
    }

    /// Convert a whole export. `None` (no data) and an empty export are both fatal.
    pub fn convert_lists(lists: Option<&[TodoList]>) -> Result<String, ConvertError> {
        let lists = match lists {
            None => return Err(ConvertError::Input("export has no task list data")),
            Some([]) => return Err(ConvertError::Input("export contains no task lists")),
            Some(lists) => lists,
        };

        let mut writer = OrgWriter::new();
        for list in lists {
            convert_list(&mut writer, list)?;
        }
        log::info!("converted {} task lists", lists.len());
        Ok(writer.finish())
    }

    pub fn convert_list(writer: &mut OrgWriter, list: &TodoList) -> Result<(), ConvertError> {
        let tagged = extract_tags(&list.title);
        let mut tags = heading_tags(&tagged.tags);
        if let Some(folder) = &list.folder {
            tags.push(folder.title.clone());
        }
        log::debug!(
            "list {:?}: {} tasks at depth {}",
            tagged.title,
            list.tasks.len(),
            writer.depth()
        );

        writer.heading(&tagged.title, None, &tags);

        let mut tasks = writer.scoped_depth(None)?;
        for task in &list.tasks {
            convert_task(&mut tasks, task)?;
        }
        Ok(())
    }

    pub fn convert_task(writer: &mut OrgWriter, task: &Task) -> Result<(), ConvertError> {
        let tagged = extract_tags(&task.title);
        let tags = heading_tags(&tagged.tags);
        let state = TodoState::of(task);
        log::debug!("task {:?} ({})", tagged.title, state.keyword());

        writer.node(Node {
            title: &tagged.title,
            tags: &tags,
            timestamp: parse_field("dueDate", task.due_date.as_deref()),
            timestamp_type: Some("deadline"),
            todo_state: Some(state.keyword()),
            ..Node::default()
        });

        {
            let mut props = writer.drawer("properties");
            write_properties(&mut props, task);
        }

        for note in &task.notes {
            writer.content(&note.content);
        }

        if !task.comments.is_empty() {
            {
                let mut section = writer.scoped_depth(None)?;
                section.heading("Comments", None, &[]);
                for comment in &task.comments {
                    section.list_item(&comment_item(comment));
                }
            }
            writer.blank_line();
        }

        if !task.files.is_empty() {
            {
                let mut section = writer.scoped_depth(None)?;
                section.heading("Files", None, &[]);
                for file in &task.files {
                    section.list_item(&file_link(file));
                }
            }
            writer.blank_line();
        }

        Ok(())
    }

    fn write_properties(writer: &mut OrgWriter, task: &Task) {
        if let Some(person) = &task.created_by {
            writer.property("created-by", Some(&person_link(person)));
        }

        if let Some(created) = parse_field("createdAt", task.created_at.as_deref()) {
            writer
                .property("created", None)
                .timestamp(Some(created), None, false, true);
        }

        if let Some(person) = &task.completed_by {
            writer.property("COMPLETED-BY", Some(&person_link(person)));
        }

        if let Some(completed) = parse_field("completedAt", task.completed_at.as_deref()) {
            writer
                .property("completed", None)
                .timestamp(Some(completed), None, false, true);
        }

        let reminders: Vec<NaiveDateTime> = task
            .reminders
            .iter()
            .filter_map(|r| parse_field("remindAt", r.remind_at.as_deref()))
            .collect();
        if !reminders.is_empty() {
            writer.property("reminders", None);
            for (idx, reminder) in reminders.into_iter().enumerate() {
                if idx > 0 {
                    writer.emit_inline(" ");
                }
                writer.timestamp(Some(reminder), None, false, false);
            }
            writer.blank_line();
        }

        if let Some(person) = &task.assignee {
            writer.property("assignee", Some(&person_link(person)));
        }
    }

    /// Extracted `#tag` markers become heading tags without their `#`.
    fn heading_tags(markers: &[String]) -> Vec<String> {
        markers
            .iter()
            .map(|m| m.strip_prefix('#').unwrap_or(m).to_string())
            .collect()
    }

    fn parse_field(field: &str, raw: Option<&str>) -> Option<NaiveDateTime> {
        let raw = raw.filter(|r| !r.is_empty())?;
        let parsed = parse_date(raw);
        if parsed.is_none() {
            log::warn!("ignoring unparseable {field} {raw:?}");
        }
        parsed
    }

    pub fn person_link(person: &Person) -> String {
        format!("[[mailto:{}][{}]]", person.email, person.name)
    }

    pub fn file_link(file: &FileRef) -> String {
        format!("[[file:{}][{}]]", file.file_path, file.file_name)
    }

    fn comment_item(comment: &Comment) -> String {
        format!("{}: {}", person_link(&comment.author), comment.text)
    }

}

pub mod loader {
    //! Reading exports from text and from disk.

    use crate::error::ConvertError;
    use crate::mapper::convert_lists;
    use crate::model::TodoList;
    use anyhow::{Context, Result};
    use std::{fs, path::Path};

    /// Source of parsed exports. Reading is kept apart from conversion.
    pub trait ExportReader {
        fn read_file(&self, path: &Path) -> Result<Option<Vec<TodoList>>>;
    }

    /// Reads Wunderlist JSON exports.
    pub struct JsonExportReader;

    impl ExportReader for JsonExportReader {
        fn read_file(&self, path: &Path) -> Result<Option<Vec<TodoList>>> {
            let text = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
            parse_export(&text).with_context(|| format!("parsing {:?}", path))
        }
    }

    pub fn strip_bom(text: &str) -> &str {
        text.strip_prefix('\u{feff}').unwrap_or(text)
    }

    /// Deserialize an export. Blank input and a JSON `null` root both yield `None`.
    pub fn parse_export(text: &str) -> Result<Option<Vec<TodoList>>, ConvertError> {
        let text = strip_bom(text);
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(text)?)
    }

    pub fn convert_str(text: &str) -> Result<String, ConvertError> {
        let lists = parse_export(text)?;
        convert_lists(lists.as_deref())
    }

    pub fn convert_file(path: &Path) -> Result<String> {
        let lists = JsonExportReader.read_file(path)?;
        convert_lists(lists.as_deref()).with_context(|| format!("converting {:?}", path))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn bom_is_stripped() {
            let out = convert_str("\u{feff}[{\"title\":\"Inbox\",\"tasks\":[]}]").expect("convert");
            assert_eq!(out, "* Inbox\n");
        }

        #[test]
        fn blank_and_null_roots_are_absent() {
            assert_eq!(parse_export("  \n").expect("blank"), None);
            assert_eq!(parse_export("null").expect("null"), None);
            assert!(matches!(convert_str(""), Err(ConvertError::Input(_))));
            assert!(matches!(convert_str("[]"), Err(ConvertError::Input(_))));
        }

        #[test]
        fn malformed_json_is_a_parse_error() {
            assert!(matches!(convert_str("{oops"), Err(ConvertError::Parse(_))));
        }

        #[test]
        fn convert_file_reports_path() {
            let tmp = tempfile::tempdir().expect("tempdir");
            let missing = tmp.path().join("missing.json");
            let err = convert_file(&missing).expect_err("missing file");
            assert!(format!("{err:#}").contains("missing.json"));
        }
    }
}

pub use error::ConvertError;
pub use loader::{ExportReader, JsonExportReader, convert_file, convert_str, parse_export};
pub use mapper::{convert_list, convert_lists, convert_task};
pub use tags::{TaggedTitle, extract_tags};
pub use writer::{Node, OrgWriter, Scope};
