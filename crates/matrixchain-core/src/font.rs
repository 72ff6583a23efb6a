//! Built-in 8-row column font.
//!
//! Every glyph carries its own trailing blank column where one is wanted, so
//! consecutive glyphs can be written back to back.

/// Column bytes of every built-in glyph, bit 0 = top row.
#[rustfmt::skip]
pub(crate) const FONT_DATA: [u8; 497] = [
    0x00, 0x00, 0x00, 0x00,             // ' '
    0x5F, 0x00,                         // '!'
    0x03, 0x00, 0x03, 0x00,             // '"'
    0x14, 0x3E, 0x14, 0x3E, 0x14, 0x00, // '#'
    0x24, 0x6A, 0x2B, 0x12, 0x00,       // '$'
    0x63, 0x13, 0x08, 0x64, 0x63, 0x00, // '%'
    0x36, 0x49, 0x56, 0x20, 0x50, 0x00, // '&'
    0x03, 0x00,                         // '\''
    0x1C, 0x22, 0x41, 0x00,             // '('
    0x41, 0x22, 0x1C, 0x00,             // ')'
    0x28, 0x18, 0x0E, 0x18, 0x28, 0x00, // '*'
    0x08, 0x08, 0x3E, 0x08, 0x08, 0x00, // '+'
    0xB0, 0x70, 0x00,                   // ','
    0x08, 0x08, 0x08,                   // '-'
    0x60, 0x60, 0x00,                   // '.'
    0x60, 0x18, 0x06, 0x01, 0x00,       // '/'
    0x3E, 0x41, 0x41, 0x3E, 0x00,       // '0'
    0x42, 0x7F, 0x40, 0x00,             // '1'
    0x62, 0x51, 0x49, 0x46, 0x00,       // '2'
    0x22, 0x41, 0x49, 0x36, 0x00,       // '3'
    0x18, 0x14, 0x12, 0x7F, 0x00,       // '4'
    0x27, 0x45, 0x45, 0x39, 0x00,       // '5'
    0x3E, 0x49, 0x49, 0x30, 0x00,       // '6'
    0x61, 0x11, 0x09, 0x07, 0x00,       // '7'
    0x36, 0x49, 0x49, 0x36, 0x00,       // '8'
    0x06, 0x49, 0x49, 0x3E, 0x00,       // '9'
    0x14, 0x00,                         // ':'
    0x20, 0x14, 0x00,                   // ';'
    0x08, 0x14, 0x22, 0x00,             // '<'
    0x14, 0x14, 0x14, 0x00,             // '='
    0x22, 0x14, 0x08, 0x00,             // '>'
    0x02, 0x59, 0x09, 0x06, 0x00,       // '?'
    0x3E, 0x49, 0x55, 0x5D, 0x0E, 0x00, // '@'
    0x7E, 0x11, 0x11, 0x7E, 0x00,       // 'A'
    0x7F, 0x49, 0x49, 0x36, 0x00,       // 'B'
    0x3E, 0x41, 0x41, 0x22, 0x00,       // 'C'
    0x7F, 0x41, 0x41, 0x3E, 0x00,       // 'D'
    0x7F, 0x49, 0x49, 0x41, 0x00,       // 'E'
    0x7F, 0x09, 0x09, 0x01, 0x00,       // 'F'
    0x3E, 0x41, 0x49, 0x7A, 0x00,       // 'G'
    0x7F, 0x08, 0x08, 0x7F, 0x00,       // 'H'
    0x41, 0x7F, 0x41, 0x00,             // 'I'
    0x30, 0x40, 0x41, 0x3F, 0x00,       // 'J'
    0x7F, 0x08, 0x14, 0x63, 0x00,       // 'K'
    0x7F, 0x40, 0x40, 0x40, 0x00,       // 'L'
    0x7F, 0x02, 0x0C, 0x02, 0x7F, 0x00, // 'M'
    0x7F, 0x04, 0x08, 0x10, 0x7F, 0x00, // 'N'
    0x3E, 0x41, 0x41, 0x3E, 0x00,       // 'O'
    0x7F, 0x09, 0x09, 0x06, 0x00,       // 'P'
    0x3E, 0x41, 0x41, 0xBE, 0x00,       // 'Q'
    0x7F, 0x09, 0x09, 0x76, 0x00,       // 'R'
    0x46, 0x49, 0x49, 0x32, 0x00,       // 'S'
    0x01, 0x01, 0x7F, 0x01, 0x01, 0x00, // 'T'
    0x3F, 0x40, 0x40, 0x3F, 0x00,       // 'U'
    0x0F, 0x30, 0x40, 0x30, 0x0F, 0x00, // 'V'
    0x3F, 0x40, 0x38, 0x40, 0x3F, 0x00, // 'W'
    0x63, 0x14, 0x08, 0x14, 0x63, 0x00, // 'X'
    0x07, 0x08, 0x70, 0x08, 0x07, 0x00, // 'Y'
    0x61, 0x51, 0x49, 0x47, 0x00,       // 'Z'
    0x7D, 0x12, 0x12, 0x7D, 0x00,       // 'Ä'
    0x21, 0x54, 0x54, 0x79, 0x00,       // 'ä'
    0x3D, 0x42, 0x42, 0x3D, 0x00,       // 'Ö'
    0x39, 0x44, 0x44, 0x39, 0x00,       // 'ö'
    0x3D, 0x40, 0x40, 0x3D, 0x00,       // 'Ü'
    0x3A, 0x40, 0x40, 0x3A, 0x00,       // 'ü'
    0xFE, 0x29, 0x36, 0x00,             // 'ß'
    0x7F, 0x41, 0x00,                   // '['
    0x01, 0x06, 0x18, 0x60, 0x00,       // '\\'
    0x41, 0x7F, 0x00,                   // ']'
    0x40, 0x40, 0x40, 0x40, 0x00,       // '_'
    0x03, 0x00,                         // '`'
    0x20, 0x54, 0x54, 0x78, 0x00,       // 'a'
    0x7F, 0x44, 0x44, 0x38, 0x00,       // 'b'
    0x38, 0x44, 0x44, 0x28, 0x00,       // 'c'
    0x38, 0x44, 0x44, 0x7F, 0x00,       // 'd'
    0x38, 0x54, 0x54, 0x18, 0x00,       // 'e'
    0x04, 0x7E, 0x05, 0x00,             // 'f'
    0x98, 0xA4, 0xA4, 0x78, 0x00,       // 'g'
    0x7F, 0x04, 0x04, 0x78, 0x00,       // 'h'
    0x44, 0x7D, 0x40, 0x00,             // 'i'
    0x40, 0x80, 0x84, 0x7D, 0x00,       // 'j'
    0x7F, 0x10, 0x28, 0x44, 0x00,       // 'k'
    0x41, 0x7F, 0x40, 0x00,             // 'l'
    0x7C, 0x04, 0x7C, 0x04, 0x78, 0x00, // 'm'
    0x7C, 0x04, 0x04, 0x78, 0x00,       // 'n'
    0x38, 0x44, 0x44, 0x38, 0x00,       // 'o'
    0xFC, 0x24, 0x24, 0x18, 0x00,       // 'p'
    0x18, 0x24, 0x24, 0xFC, 0x00,       // 'q'
    0x7C, 0x08, 0x04, 0x04, 0x00,       // 'r'
    0x48, 0x54, 0x54, 0x24, 0x00,       // 's'
    0x04, 0x3F, 0x44, 0x00,             // 't'
    0x3C, 0x40, 0x40, 0x7C, 0x00,       // 'u'
    0x1C, 0x20, 0x40, 0x20, 0x1C, 0x00, // 'v'
    0x3C, 0x40, 0x3C, 0x40, 0x3C, 0x00, // 'w'
    0x44, 0x28, 0x10, 0x28, 0x44, 0x00, // 'x'
    0x9C, 0xA0, 0xA0, 0x7C, 0x00,       // 'y'
    0x64, 0x54, 0x4C, 0x00,             // 'z'
    0x08, 0x36, 0x41, 0x00,             // '{'
    0x7F, 0x00,                         // '|'
    0x41, 0x36, 0x08, 0x00,             // '}'
    0x08, 0x04, 0x08, 0x04, 0x00,       // '~'
    0x02, 0x01, 0x02, 0x00,             // '^'
    0x06, 0x09, 0x09, 0x06, 0x00,       // '°'
    0x9E, 0xA5, 0x79, 0x00,             // '§'
    0x14, 0x1C, 0x36, 0x55, 0x55, 0x00, // '€'
];

/// `(key, offset, length)` into [`FONT_DATA`], in lookup order.
#[rustfmt::skip]
pub(crate) const BUILTIN_GLYPHS: [(char, u16, u8); 105] = [
    (' ', 0, 4),
    ('!', 4, 2),
    ('"', 6, 4),
    ('#', 10, 6),
    ('$', 16, 5),
    ('%', 21, 6),
    ('&', 27, 6),
    ('\'', 33, 2),
    ('(', 35, 4),
    (')', 39, 4),
    ('*', 43, 6),
    ('+', 49, 6),
    (',', 55, 3),
    ('-', 58, 3),
    ('.', 61, 3),
    ('/', 64, 5),
    ('0', 69, 5),
    ('1', 74, 4),
    ('2', 78, 5),
    ('3', 83, 5),
    ('4', 88, 5),
    ('5', 93, 5),
    ('6', 98, 5),
    ('7', 103, 5),
    ('8', 108, 5),
    ('9', 113, 5),
    (':', 118, 2),
    (';', 120, 3),
    ('<', 123, 4),
    ('=', 127, 4),
    ('>', 131, 4),
    ('?', 135, 5),
    ('@', 140, 6),
    ('A', 146, 5),
    ('B', 151, 5),
    ('C', 156, 5),
    ('D', 161, 5),
    ('E', 166, 5),
    ('F', 171, 5),
    ('G', 176, 5),
    ('H', 181, 5),
    ('I', 186, 4),
    ('J', 190, 5),
    ('K', 195, 5),
    ('L', 200, 5),
    ('M', 205, 6),
    ('N', 211, 6),
    ('O', 217, 5),
    ('P', 222, 5),
    ('Q', 227, 5),
    ('R', 232, 5),
    ('S', 237, 5),
    ('T', 242, 6),
    ('U', 248, 5),
    ('V', 253, 6),
    ('W', 259, 6),
    ('X', 265, 6),
    ('Y', 271, 6),
    ('Z', 277, 5),
    ('Ä', 282, 5),
    ('ä', 287, 5),
    ('Ö', 292, 5),
    ('ö', 297, 5),
    ('Ü', 302, 5),
    ('ü', 307, 5),
    ('ß', 312, 4),
    ('[', 316, 3),
    ('\\', 319, 5),
    (']', 324, 3),
    ('_', 327, 5),
    ('`', 332, 2),
    ('a', 334, 5),
    ('b', 339, 5),
    ('c', 344, 5),
    ('d', 349, 5),
    ('e', 354, 5),
    ('f', 359, 4),
    ('g', 363, 5),
    ('h', 368, 5),
    ('i', 373, 4),
    ('j', 377, 5),
    ('k', 382, 5),
    ('l', 387, 4),
    ('m', 391, 6),
    ('n', 397, 5),
    ('o', 402, 5),
    ('p', 407, 5),
    ('q', 412, 5),
    ('r', 417, 5),
    ('s', 422, 5),
    ('t', 427, 4),
    ('u', 431, 5),
    ('v', 436, 6),
    ('w', 442, 6),
    ('x', 448, 6),
    ('y', 454, 5),
    ('z', 459, 4),
    ('{', 463, 4),
    ('|', 467, 2),
    ('}', 469, 4),
    ('~', 473, 5),
    ('^', 478, 4),
    ('°', 482, 5),
    ('§', 487, 4),
    ('€', 491, 6),
];
