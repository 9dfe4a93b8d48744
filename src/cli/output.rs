//! Output formatting utilities

use crate::domain::{format_amount, Student};

/// Format one student as `ID  Name  Amount`
pub fn format_student(student: &Student) -> String {
    format!(
        "{}  {}  {}",
        student.id,
        student.name,
        format_amount(student.amount_paid)
    )
}

/// Format the registry as an aligned table
pub fn format_student_table(students: &[Student]) -> String {
    if students.is_empty() {
        return "No students registered".to_string();
    }

    let id_width = students
        .iter()
        .map(|s| s.id.chars().count())
        .chain(std::iter::once("Student ID".len()))
        .max()
        .unwrap_or(0);
    let name_width = students
        .iter()
        .map(|s| s.name.chars().count())
        .chain(std::iter::once("Name".len()))
        .max()
        .unwrap_or(0);

    let mut output = format!(
        "{:<id_width$}  {:<name_width$}  {:>12}\n",
        "Student ID", "Name", "Amount Paid"
    );
    for student in students {
        output.push_str(&format!(
            "{:<id_width$}  {:<name_width$}  {:>12}\n",
            student.id,
            student.name,
            format_amount(student.amount_paid)
        ));
    }
    output
}
