//! User-facing reply texts and button labels (Arabic, single locale).

use std::collections::BTreeSet;

use crate::taxonomy::ContentType;

/// Fixed button labels. Classification in [`crate::event`] resolves these
/// back to commands, so a label change here is a protocol change.
pub mod labels {
    pub const BEGIN: &str = "ابدأ 🎓";
    pub const HOME: &str = "🏠 القائمة الرئيسية";
    pub const BACK: &str = "🔙 رجوع";
    pub const FINISH: &str = "✅ تم الإرسال";
    pub const CANCEL: &str = "❌ إلغاء";
}

pub const WELCOME: &str = "مرحبًا بك في بوت كلية الطب – جامعة المناقل! 👋\nاختر 'ابدأ' للمتابعة.";

pub const HELP: &str = "أنا أوزع المحاضرات والمراجع على الطلاب 📚\n\
/start – القائمة الرئيسية\n\
/register – تسجيل ملف واحد\n\
/cancel – إلغاء العملية الحالية";

pub const CHOOSE_SEMESTER: &str = "اختر السمستر الدراسي:";

pub const CHOOSE_COURSE: &str = "اختر المقرر الدراسي:";

pub const NOT_AVAILABLE: &str = "لم يتم العثور على هذا المحتوى بعد 🚧";

pub const BACK_HOME: &str = "عدت إلى القائمة الرئيسية 🏠";

pub const NOT_UNDERSTOOD: &str = "لم أفهم رسالتك 🤔 استخدم الأزرار أو أرسل /start.";

pub const OPERATOR_ONLY: &str = "هذا الأمر متاح للمشرف فقط 🔒";

pub const CANCELLED: &str = "تم إلغاء العملية ❌";

pub const NOTHING_TO_CANCEL: &str = "لا توجد عملية جارية لإلغائها.";

pub const STORAGE_UNAVAILABLE: &str = "تعذر الوصول إلى قاعدة البيانات حاليًا ⚠️ حاول مرة أخرى لاحقًا.";

pub const DELIVERY_FAILED: &str = "تعذر إرسال الملف حاليًا ⚠️ حاول مرة أخرى لاحقًا.";

pub const NO_PENDING: &str = "لا يوجد ملف قيد التسجيل. أرسل /register للبدء.";

pub const REGISTER_HINT: &str = "أرسل /register أولاً لتسجيل ملف 📎";

// Selection-order guards; carried inside AppError::IncompleteSelection and
// surfaced to the user verbatim.
pub const PICK_SEMESTER_FIRST: &str = "اختر السمستر أولاً 🎓";
pub const PICK_COURSE_FIRST: &str = "اختر المقرر أولاً 📘";
pub const NO_FILES_TO_SAVE: &str = "لا توجد ملفات للحفظ بعد. أرسل ملفًا واحدًا على الأقل 📎";

pub fn choose_type(course: &str) -> String {
    format!("اختر نوع المحتوى لمقرر {course}:")
}

pub fn sending(content_type: ContentType, course: &str, uploaders: &BTreeSet<String>) -> String {
    let mut text = format!("جارٍ إرسال {} الخاص بمقرر {course}...", content_type.display_name());
    if !uploaders.is_empty() {
        let names: Vec<&str> = uploaders.iter().map(String::as_str).collect();
        text.push_str(&format!("\n👨‍🏫 من: {}", names.join("، ")));
    }
    text
}

pub fn file_caption(course: &str, content_type: ContentType, uploader: Option<&str>) -> String {
    let mut caption = format!("{course} – {}", content_type.display_name());
    if let Some(name) = uploader {
        caption.push_str(&format!("\n👨‍🏫 {name}"));
    }
    caption
}

// Operator batch flow

pub const UPLOAD_STARTED: &str = "جلسة رفع جديدة 📦 اختر السمستر:";

pub const PICK_TYPE_FIRST: &str = "أكمل اختيار نوع المحتوى أولاً قبل إرسال الملفات.";

pub const UPLOAD_SESSION_HINT: &str = "لديك جلسة رفع نشطة 📦 تابع الاختيار من الأزرار أو أرسل ❌ إلغاء.";

pub fn send_files_now(course: &str, content_type: ContentType) -> String {
    format!(
        "أرسل الملفات الآن 📎 ({course} – {}). عند الانتهاء اضغط {}.",
        content_type.display_name(),
        labels::FINISH
    )
}

pub fn file_accepted(count: usize) -> String {
    format!("تم استلام الملف ✅ (العدد: {count})")
}

pub fn type_mismatch(expected: ContentType) -> String {
    format!(
        "نوع الملف لا يطابق النوع المحدد ({}) ❌ لم يُضف الملف.",
        expected.display_name()
    )
}

pub fn batch_saved(saved: usize, total: usize) -> String {
    format!("تم حفظ {saved} من {total} ملف ✅")
}

// Single-file registration flow

pub const REGISTER_STARTED: &str = "أرسل الملف الذي تريد تسجيله الآن 📎";

pub const ASK_UPLOADER: &str = "تم استلام الملف ✅ أرسل اسم المحاضر (صاحب الملف):";

pub const PENDING_PICK_SEMESTER: &str = "اختر السمستر الذي يتبع له الملف:";

pub const PENDING_SEND_FILE_FIRST: &str = "أرسل الملف أولاً 📎";

pub fn pending_saved(course: &str, content_type: ContentType) -> String {
    format!("تم حفظ الملف في {course} – {} ✅", content_type.display_name())
}

// Administrative direct insert

pub const ADDFILE_USAGE: &str = "/addfile <semester> <course> <type> <file_ref>";

pub fn malformed_command(usage: &str) -> String {
    format!("الصيغة غير صحيحة. الاستخدام:\n{usage}")
}

pub fn addfile_saved(course: &str, content_type: ContentType) -> String {
    format!("تمت إضافة الملف إلى {course} – {} ✅", content_type.display_name())
}
