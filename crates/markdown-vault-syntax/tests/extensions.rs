//! Trees produced by the full dialect, written in bracket notation.

mod common;

use common::{check, check_with};
use markdown_vault_syntax::{MarkdownParser, extensions};

#[test]
fn comment_ends_leaf() {
    check(
        r"
{P:plaintext}
{C:{cm:%%}comment
- still comment
> and still comment
{cm:%%}}
",
    );
}

#[test]
fn comment_trailing_text() {
    check(
        r"
{C:{cm:%%}comment{cm:%%}} {P:plaintext}
",
    );
}

#[test]
fn comment_trailing_text_in_list_item() {
    check(
        r"
{BL:{LI:{l:-} {C:{cm:%%}comment{cm:%%}} {P:plaintext}}
{LI:{l:-} {P:next}}}
",
    );
}

#[test]
fn comment_trailing_text_in_blockquote() {
    check(
        r"
{Q:{q:>} {C:{cm:%%}comment{cm:%%}} {P:plaintext
{q:>} more}}
",
    );
}

#[test]
fn comment_unterminated() {
    check(
        r"
{C:{cm:%%}comment

# this is never terminated
    }",
    );
}

#[test]
fn comment_escaped_close() {
    check(
        r"
{C:{cm:%%}a \%% b{cm:%%}}
",
    );
}

#[test]
fn comment_inline() {
    check(
        r"
{P:plaintext {C:{cm:%%}comment{cm:%%}} more plaintext}

{P:plaintext %%not a comment
more %% plaintext}
",
    );
}

#[test]
fn footnotes() {
    check(
        r"
{P:Some info{FN:{fM:[^}{fL:1}{fM:]}}}

{P:Some more info{FN:{fM:[^}{fL:a$wacky^foot-note}{fM:]}}}
",
    );
}

#[test]
fn footnote_reference_simple() {
    check(
        r"
{FR:{fM:[^}{fL:1}{fM:]:} Some basic info}
{FR:{fM:[^}{fL:2}{fM:]:} Some {St:{e:**}bold{e:**}} info}
",
    );
}

#[test]
fn footnote_reference_multiline() {
    check(
        r"
{FR:{fM:[^}{fL:1}{fM:]:} Line 1
Line 2}
{FR:{fM:[^}{fL:2}{fM:]:} Line 3
Line 4
Line 5}
",
    );
}

#[test]
fn footnote_reference_between_bullets() {
    check(
        r"
{FR:{fM:[^}{fL:1}{fM:]:} Line 1}
{BL:{LI:{l:-} {P:Line 2
{FN:{fM:[^}{fL:2}{fM:]}}: Line 3}}}

{FR:{fM:[^}{fL:2}{fM:]:} Line 5}
{BL:{LI:{l:-} {P:Line 6}}}
",
    );
}

#[test]
fn footnote_reference_in_blockquote() {
    check(
        r"
{Q:{q:>} {FR:{fM:[^}{fL:1}{fM:]:} a b
{q:>} c}}
",
    );
}

#[test]
fn hashtags() {
    check(
        r"
{P:Some text. {H:{hm:#}{hl:tag}} {H:{hm:#}{hl:other-tag9}}^not part
{H:{hm:#}{hl:ñáø√}}}

{P:Test number #1234}
",
    );
}

#[test]
fn internal_link_bare() {
    check(
        r"
{P:before {IL:{iM:[[}{iP:Some File}{iM:]]}} after}
",
    );
}

#[test]
fn internal_link_heading() {
    check(
        r"
{P:{IL:{iM:[[}{iP:Some File}{iS:#heading}{iM:]]}}}
",
    );
}

#[test]
fn internal_link_block() {
    check(
        r"
{P:{IL:{iM:[[}{iP:Some File}{iS:#^blockid}{iM:]]}}}
",
    );
}

#[test]
fn internal_link_display_text() {
    check(
        r"
{P:{IL:{iM:[[}{iP:Some File}{iM:|}{iD:something else}{iM:]]}}}
",
    );
}

#[test]
fn internal_link_heading_and_display_text() {
    check(
        r"
{P:{IL:{iM:[[}{iP:Some File}{iS:#heading}{iM:|}{iD:something else}{iM:]]}}}
",
    );
}

#[test]
fn embed_file() {
    check(
        r"
{P:{EM:{eM:!}{IL:{iM:[[}{iP:moon.jpg}{iM:]]}}}}
",
    );
}

#[test]
fn embed_heading() {
    check(
        r"
{P:{EM:{eM:!}{IL:{iM:[[}{iP:markdown file}{iS:#a heading}{iM:]]}}}}
",
    );
}

#[test]
fn mark() {
    check(
        r"
{P:{M:{mm:==}Hi{mm:==}} Hello, world!}",
    );
}

#[test]
fn mark_does_not_cross_paragraphs() {
    check(
        r"
{P:This ==has a}

{P:new paragraph==.}",
    );
}

#[test]
fn mark_nested() {
    check(
        r"
{P:Nesting {St:{e:**}with {M:{mm:==}emphasis{mm:==}}{e:**}}.}",
    );
}

#[test]
fn mark_overlapping() {
    check(
        r"
{P:One {St:{e:**}two ==three{e:**}} four==}

{P:One {M:{mm:==}two **three{mm:==}} four**}",
    );
}

#[test]
fn mark_escaped() {
    check(
        r"
{P:A {Esc:\=}=b c==}",
    );
}

#[test]
fn task_list_unordered() {
    check(
        r"
{BL:{LI:{l:-} {T:{t:[ ]} foo}}
{LI:{l:-} {T:{t:[x]} bar}}}",
    );
}

#[test]
fn task_list_nested() {
    check(
        r"
{BL:{LI:{l:-} {T:{t:[x]} foo}
  {BL:{LI:{l:-} {T:{t:[ ]} bar}}
  {LI:{l:-} {T:{t:[x]} baz}}}}
{LI:{l:-} {T:{t:[ ]} bim}}}",
    );
}

#[test]
fn task_list_ordered() {
    check(
        r"
{OL:{LI:{l:1.} {T:{t:[X]} Okay}}}",
    );
}

#[test]
fn task_list_yields_to_setext_heading() {
    check(
        r"
{OL:{LI:{l:1.} {SH1:{Ln:{L:[}X{L:]}} foo
   {h:===}}}}",
    );
}

#[test]
fn task_list_markers() {
    check(
        r"
{BL:{LI:{l:-} {T:{t:[a]} foo}}
{LI:{l:-} {T:{t:[[]} bar}}
{LI:{l:-} {T:{t:[]]} baz}}
{LI:{l:-} {T:{t:[\]} bim}}}
",
    );
}

#[test]
fn tex_block_ends_leaf() {
    check(
        r"
{P:plaintext}
{XB:{xm:$$}tex content
- still tex
> and still tex
{xm:$$}}
",
    );
}

#[test]
fn tex_block_trailing_text() {
    check(
        r"
{XB:{xm:$$}tex content{xm:$$}} {P:plaintext}
",
    );
}

#[test]
fn tex_block_trailing_text_in_list_item() {
    check(
        r"
{OL:{LI:{l:1.} {XB:{xm:$$}x{xm:$$}} {P:{St:{e:**}bold{e:**}}}}}
",
    );
}

#[test]
fn tex_block_in_blockquote_keeps_marks() {
    check(
        r"
{Q:{q:>} {XB:{xm:$$}
{q:>} x
{q:>} {xm:$$}} {P:after}}
",
    );
}

#[test]
fn tex_block_unterminated() {
    check(
        r"
{XB:{xm:$$}tex content

# this is never terminated
    }",
    );
}

#[test]
fn tex_inline() {
    check(
        r"
{P:plaintext {XI:{xm:$}tex content{xm:$}} more plaintext}

{P:plaintext {XI:{xm:$}tex content{xm:$}}more plaintext}

{P:{XI:{xm:$}1.234{xm:$}}}
",
    );
}

#[test]
fn tex_inline_rejected() {
    check(
        r"
{P:$not tex$1.234}

{P:$also not tex $}

{P:$ still not tex$}

{P:{XI:{xm:$}actually tex
{xm:$}}}

{P:{XI:{xm:$}tex
more text
{xm:$}}}
",
    );
}

#[test]
fn yaml_front_matter() {
    check(
        r"
{YF:{ym:---}
{yc:tags: blah}
{ym:---}}

{HR:---}

{P:some text}

{SH2:A header
{h:---}}
",
    );
}

#[test]
fn yaml_front_matter_trailing_text() {
    check(
        r"
{YF:{ym:---}
{yc:tags: blah}
{ym:---}}{P:test}

{HR:---}

{P:some text}

{SH2:A header
{h:---}}
",
    );
}

#[test]
fn yaml_front_matter_needs_close() {
    check(
        r"
{HR:---}

{P:some text}

{SH1:A header
{h:===}}
",
    );
}

#[test]
fn yaml_front_matter_close_not_indented() {
    check(
        r"
{HR:---}

{P:some text}

 {HR:---}
",
    );
}

#[test]
fn yaml_front_matter_no_space_after_open() {
    check(
        r"
{HR:--- }

{P:some text}

{HR:---}
",
    );
}

#[test]
fn yaml_front_matter_only_at_start() {
    check(
        r"
{P:some text}

{HR:---}

{P:some text}

{HR:---}
",
    );
}

#[test]
fn without_front_matter_extension() {
    let parser = MarkdownParser::default()
        .configure(&extensions::block_and_inline())
        .unwrap();
    check_with(
        &parser,
        r"{HR:---}
{SH2:a: b
{h:---}}
",
    );
}

#[test]
fn host_only_parser_ignores_dialect() {
    check_with(
        &MarkdownParser::default(),
        r"{P:==a== #tag [{Ln:{L:[}b{L:]}}] %%c%% $d$}
",
    );
}

#[test]
fn tex_inline_prices_are_not_tex() {
    check(
        r"{P:$5 and $10}
",
    );
}

#[test]
fn comment_inline_then_text() {
    check(
        r"{P:see {C:{cm:%%}comment{cm:%%}} rest}
",
    );
}

#[test]
fn table_with_inline_extensions() {
    check(
        r"{TB:{TH:{td:|} {TC:Note} {td:|} {TC:Tags} {td:|}}
{td:|:--|--:|}
{TR:{td:|} {TC:{IL:{iM:[[}{iP:Home}{iM:]]}}} {td:|} {TC:{H:{hm:#}{hl:todo}}} {td:|}}}
",
    );
}

#[test]
fn table_without_extension_is_paragraph() {
    check_with(
        &MarkdownParser::default(),
        r"{P:a | b
--|--}
",
    );
}
