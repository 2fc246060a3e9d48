//! Abstract reply keyboards.
//!
//! The controller describes a keyboard as rows of button labels; the
//! transport adapter renders it into the platform's reply-markup type. Every
//! button label here resolves back to a typed event in [`crate::event`].

use crate::taxonomy::{ContentType, Semester};
use crate::text::labels;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<String>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// The single "begin" button shown with the welcome message.
    pub fn start() -> Self {
        Self::new(vec![vec![labels::BEGIN.to_string()]])
    }

    /// Semester menu for viewers: two semesters per row plus a home row.
    pub fn semesters() -> Self {
        let mut rows = semester_rows();
        rows.push(vec![labels::HOME.to_string()]);
        Self::new(rows)
    }

    /// Course menu for viewers: the semester's courses plus back/home.
    pub fn courses(semester: Semester) -> Self {
        let mut rows = course_rows(semester);
        rows.push(vec![labels::BACK.to_string(), labels::HOME.to_string()]);
        Self::new(rows)
    }

    /// Content-type menu for viewers.
    pub fn content_types() -> Self {
        Self::new(vec![
            content_type_row(),
            vec![labels::BACK.to_string(), labels::HOME.to_string()],
        ])
    }

    /// Semester menu inside a registration flow: cancel instead of back/home.
    pub fn semesters_with_cancel() -> Self {
        let mut rows = semester_rows();
        rows.push(vec![labels::CANCEL.to_string()]);
        Self::new(rows)
    }

    /// Course menu inside a registration flow.
    pub fn courses_with_cancel(semester: Semester) -> Self {
        let mut rows = course_rows(semester);
        rows.push(vec![labels::CANCEL.to_string()]);
        Self::new(rows)
    }

    /// Content-type menu inside a registration flow.
    pub fn content_types_with_cancel() -> Self {
        Self::new(vec![content_type_row(), vec![labels::CANCEL.to_string()]])
    }

    /// Shown while the operator's batch session is collecting files.
    pub fn collecting() -> Self {
        Self::new(vec![vec![labels::FINISH.to_string(), labels::CANCEL.to_string()]])
    }

    /// A lone cancel button (awaiting-file mode).
    pub fn cancel_only() -> Self {
        Self::new(vec![vec![labels::CANCEL.to_string()]])
    }
}

fn semester_rows() -> Vec<Vec<String>> {
    let labels: Vec<String> = Semester::iter().map(|s| s.label()).collect();
    labels.chunks(2).map(|chunk| chunk.to_vec()).collect()
}

fn course_rows(semester: Semester) -> Vec<Vec<String>> {
    semester
        .courses()
        .iter()
        .map(|course| vec![(*course).to_string()])
        .collect()
}

fn content_type_row() -> Vec<String> {
    ContentType::iter().map(|ct| ct.label().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Semester;
    use pretty_assertions::assert_eq;

    #[test]
    fn semester_keyboard_lists_all_ten_plus_home() {
        let kb = Keyboard::semesters();
        let buttons: Vec<&String> = kb.rows.iter().flatten().collect();
        assert_eq!(buttons.len(), 11);
        assert_eq!(buttons.last().map(|s| s.as_str()), Some(labels::HOME));
    }

    #[test]
    fn course_keyboard_matches_curriculum() {
        let sem = Semester::new(3).unwrap();
        let kb = Keyboard::courses(sem);
        assert_eq!(kb.rows[0], vec!["Pathology".to_string()]);
        assert_eq!(kb.rows.len(), sem.courses().len() + 1);
        assert_eq!(
            kb.rows.last().unwrap(),
            &vec![labels::BACK.to_string(), labels::HOME.to_string()]
        );
    }

    #[test]
    fn collecting_keyboard_has_finish_and_cancel() {
        let kb = Keyboard::collecting();
        assert_eq!(
            kb.rows,
            vec![vec![labels::FINISH.to_string(), labels::CANCEL.to_string()]]
        );
    }

    #[test]
    fn cancel_variants_end_with_cancel_row() {
        for kb in [
            Keyboard::semesters_with_cancel(),
            Keyboard::courses_with_cancel(Semester::new(1).unwrap()),
            Keyboard::content_types_with_cancel(),
        ] {
            assert_eq!(kb.rows.last().unwrap(), &vec![labels::CANCEL.to_string()]);
        }
    }
}
