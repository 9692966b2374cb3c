//! The TailwindCSS setup guide for React + Vite, BankAI edition.

use crate::builder::DocumentBuilder;
use crate::error::BuildError;

/// Title shown on the first page and stored in the PDF metadata.
pub const DOCUMENT_TITLE: &str = "TailwindCSS Setup for React + Vite (BankAI Edition)";

/// File name the guide is written to unless another path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "Tailwind_Setup_BankAI.pdf";

/// Gap that closes every numbered section, in points.
const SECTION_GAP: f64 = 10.0;

const TAILWIND_CONFIG: &str = r#"export default {
  content: ["./index.html", "./src/**/*.{js,ts,jsx,tsx}"],
  theme: { extend: {} },
  plugins: [],
}"#;

const TAILWIND_DIRECTIVES: &str = "@tailwind base;
@tailwind components;
@tailwind utilities;";

const ANIMATIONS: &str = "<style>
@keyframes fadeIn { from { opacity: 0; } to { opacity: 1; } }
.animate-fade { animation: fadeIn 0.6s ease-in-out; }
@keyframes slideUp {
  from { opacity: 0; transform: translateY(12px); }
  to { opacity: 1; transform: translateY(0); }
}
.animate-slide-up { animation: slideUp 0.7s ease-out; }
</style>";

const BONUS_TIPS: [&str; 3] = [
    "Use plugins like @tailwindcss/forms and @tailwindcss/typography for UI consistency.",
    "Try color palettes: from-blue-50 via-teal-50 to-white for modern fintech look.",
    "Save components like RecorderButton, ReplyCard, ToastBox as reusable modules.",
];

const FOOTER: &str = "Crafted by Prof for Student Ganaa \u{2014} Tailwind magic, BankAI style";

/// Returns a builder holding the complete guide, ready to render.
pub fn tailwind_setup_guide() -> Result<DocumentBuilder, BuildError> {
    let mut guide = DocumentBuilder::new(DOCUMENT_TITLE);

    guide.append_title(DOCUMENT_TITLE).append_spacer(12.0)?;

    guide
        .append_heading("1. Environment Setup")
        .append_paragraph("Ensure Node.js and npm/yarn are installed:")
        .append_code_block("node -v\nnpm -v")
        .append_paragraph("Then create a new Vite + React app:")
        .append_code_block(
            "npm create vite@latest my-bankai-frontend -- --template react\ncd my-bankai-frontend",
        )
        .append_spacer(SECTION_GAP)?;

    guide
        .append_heading("2. Install TailwindCSS")
        .append_code_block(
            "npm install -D tailwindcss postcss autoprefixer\nnpx tailwindcss init -p",
        )
        .append_spacer(SECTION_GAP)?;

    guide
        .append_heading("3. Configure Tailwind")
        .append_paragraph("Edit your tailwind.config.js as follows:")
        .append_code_block(TAILWIND_CONFIG)
        .append_paragraph("And update src/index.css:")
        .append_code_block(TAILWIND_DIRECTIVES)
        .append_spacer(SECTION_GAP)?;

    guide
        .append_heading("4. Add Gradient Backgrounds + Custom Animations")
        .append_code_block(ANIMATIONS)
        .append_spacer(SECTION_GAP)?;

    guide
        .append_heading("5. Run & Test Your Project")
        .append_code_block("npm run dev\n# open http://localhost:5173")
        .append_spacer(SECTION_GAP)?;

    guide
        .append_heading("6. Build for Deployment")
        .append_code_block("npm run build")
        .append_spacer(SECTION_GAP)?;

    guide.append_heading("7. Bonus Tips").append_bullet_list(BONUS_TIPS)?;

    guide.append_spacer(16.0)?.append_footer(FOOTER);

    Ok(guide)
}
