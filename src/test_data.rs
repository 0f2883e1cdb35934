#[cfg(test)]
pub const POST_WITH_EMBED: &str = r#"---
title: "The Left Hand of Darkness"
date: 2024-03-18
tags: ["books", "sci-fi"]
---

Finished this one on a rainy weekend.

{{< instagram C2xYz_Ab-1 >}}

Genly Ai's report reads like an anthropology field journal.
"#;

#[cfg(test)]
pub const POST_WITHOUT_EMBED: &str = r#"---
title: "Notes on re-reading"
---

No pictures this time.
"#;

#[cfg(test)]
pub const POST_WITH_COVER: &str = r#"---
title: "Already illustrated"
cover:
    image: "/images/instagram/already.jpg"
    hidden: false
---

{{< instagram Cover123 >}}
"#;

#[cfg(test)]
pub const POST_WITHOUT_FRONT_MATTER: &str = "Plain text post\n\n{{< instagram NoHeader1 >}}\n";

#[cfg(test)]
pub const PAGE_WITH_OG_IMAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta property="og:title" content="Books on Instagram">
<meta property="og:image" content="https://scontent.cdninstagram.com/v/t51/photo.jpg?stp=dst-jpg&amp;_nc_ht=scontent&amp;oh=00_AfB">
<meta property="og:url" content="https://www.instagram.com/p/C2xYz_Ab-1/">
</head>
<body></body>
</html>
"#;

#[cfg(test)]
pub const PAGE_WITH_DISPLAY_URL: &str = r#"<html><head><title>Instagram</title></head>
<body>
<script type="application/json">{"shortcode":"C2xYz_Ab-1","display_url":"https://scontent.cdninstagram.com/v/t51/full.jpg?stp=dst-jpg\u0026_nc_ht=scontent\u0026oh=00_AfC","is_video":false}</script>
</body></html>
"#;

#[cfg(test)]
pub const PAGE_WITHOUT_IMAGE: &str = r#"<html><head><title>Login • Instagram</title></head><body>Please log in</body></html>"#;
